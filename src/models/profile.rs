use serde::{Deserialize, Serialize};

/// Fighter profile, replaced wholesale on save
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
  pub name: String,
}
