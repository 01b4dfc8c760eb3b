use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateMemberRequest {
    pub name: String,
    pub avatar: Option<String>,
    pub likes: Option<String>,
    pub dislikes: Option<String>,
    pub dietary: Option<String>,
}

/// Partial update: omitted fields are left unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateMemberRequest {
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub likes: Option<String>,
    pub dislikes: Option<String>,
    pub dietary: Option<String>,
}
