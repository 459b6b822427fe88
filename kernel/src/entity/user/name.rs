use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

/// Display name given at registration, stored trimmed.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct UserName(String);

impl UserName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}
