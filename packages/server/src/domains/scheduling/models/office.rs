use serde::{Deserialize, Serialize};

/// The firm's two offices. Carried on the wire and in the database as the
/// Korean office names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "office_location")]
pub enum Office {
    #[serde(rename = "천안")]
    #[sqlx(rename = "천안")]
    Cheonan,
    #[serde(rename = "평택")]
    #[sqlx(rename = "평택")]
    Pyeongtaek,
}

impl Office {
    pub fn as_str(&self) -> &'static str {
        match self {
            Office::Cheonan => "천안",
            Office::Pyeongtaek => "평택",
        }
    }
}

impl std::fmt::Display for Office {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
