#[derive(Debug, Clone, PartialEq)]
pub struct UpdateResult {
    pub updated_count: i64,
}
