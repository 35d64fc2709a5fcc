use crate::domain::model::{Scalar, ValueKind};

/// 依執行期型別分類：bool 必須先於整數判斷
pub fn classify(value: &Scalar) -> ValueKind {
    match value {
        Scalar::Bool(_) => ValueKind::Boolean,
        Scalar::Number(n) if n.is_i64() || n.is_u64() => ValueKind::Integer,
        Scalar::Number(_) => ValueKind::Float,
        Scalar::Text(_) | Scalar::Null => ValueKind::String,
    }
}
