use std::collections::BTreeMap;
use std::fmt;

use bure_core::Validate;
use schemars::JsonSchema;
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};

/// A structured recipe, only ever built from parsed model output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Recipe {
    #[schemars(description = "Название блюда")]
    pub name: String,
    #[schemars(description = "Описание блюда")]
    pub description: String,
    #[serde(deserialize_with = "unique_ingredients")]
    #[schemars(
        with = "BTreeMap<String, String>",
        description = "Словарь ингредиентов, ингредиент : количество"
    )]
    pub ingredients: BTreeMap<String, String>,
    #[schemars(description = "Пошаговый рецепт")]
    pub instructions: String,
    #[schemars(description = "Количество порций", range(min = 1))]
    pub servings: u32,
    #[schemars(description = "Время приготовления в минутах", range(min = 1))]
    pub cooking_time: u32,
    #[schemars(description = "Сложность приготовления от 1 до 5", range(min = 1, max = 5))]
    pub complexity: u8,
}

impl Validate for Recipe {
    fn validate(&self) -> Result<(), String> {
        if self.servings == 0 {
            return Err("servings must be positive".to_string());
        }
        if self.cooking_time == 0 {
            return Err("cooking_time must be positive".to_string());
        }
        if !(1..=5).contains(&self.complexity) {
            return Err(format!(
                "complexity must be between 1 and 5, got {}",
                self.complexity
            ));
        }
        Ok(())
    }
}

// serde_json keeps the last value for a repeated key; an ingredient listed
// twice is treated as malformed instead.
fn unique_ingredients<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct UniqueKeys;

    impl<'de> Visitor<'de> for UniqueKeys {
        type Value = BTreeMap<String, String>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of ingredient to quantity")
        }

        fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut out = BTreeMap::new();
            while let Some((key, value)) = access.next_entry::<String, String>()? {
                if out.contains_key(&key) {
                    return Err(de::Error::custom(format!("duplicate ingredient '{key}'")));
                }
                out.insert(key, value);
            }
            Ok(out)
        }
    }

    deserializer.deserialize_map(UniqueKeys)
}
