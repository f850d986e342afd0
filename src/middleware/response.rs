use serde::Serialize;

/// `{ "success": true, ...record }` - confirmation body that carries the
/// affected record's fields at the top level
#[derive(Debug, Serialize)]
pub struct Confirmation<T: Serialize> {
    pub success: bool,
    #[serde(flatten)]
    pub record: T,
}

impl<T: Serialize> Confirmation<T> {
    pub fn success(record: T) -> Self {
        Self {
            success: true,
            record,
        }
    }
}
