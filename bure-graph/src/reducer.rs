pub struct AppendVec;
impl AppendVec {
    pub fn merge<T: Clone>(current: &[T], mut update: Vec<T>) -> Vec<T> {
        let mut out = current.to_vec();
        out.append(&mut update);
        out
    }
}

/// Writes the update when it carries a value, keeps the current one otherwise.
pub struct Assign;
impl Assign {
    pub fn merge<T: Clone>(current: &Option<T>, update: Option<T>) -> Option<T> {
        update.or_else(|| current.clone())
    }
}
