use serde_derive::{Deserialize, Serialize};

/// User record served by `GET /api/user`, unknown fields are ignored
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserData {
    pub name: String,
    pub email: String,
}
