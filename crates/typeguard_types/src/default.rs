//! Zero values derived from constraint sets.

use typeguard_foundation::{Kind, Value};

use crate::set::TypeConstraintSet;
use crate::token::{Pseudo, TypeToken};

/// Derives a safe zero value for `set`.
///
/// The first applicable rule wins:
/// null if null is allowed, then `false`, then `0` (for `int`, `uint`,
/// `number` or `scalar`), then `0.0`, then `""`, then an empty array (for
/// `array` or `iterable`). Returns `None` when no rule applies and the
/// caller has to supply a default.
#[must_use]
pub fn try_infer_default(set: &TypeConstraintSet) -> Option<Value> {
    let basic = |kind: Kind| set.contains(&TypeToken::Basic(kind));
    let pseudo = |pseudo: Pseudo| set.contains(&TypeToken::Pseudo(pseudo));

    if set.null_ok() {
        Some(Value::Null)
    } else if basic(Kind::Bool) {
        Some(Value::Bool(false))
    } else if basic(Kind::Int)
        || pseudo(Pseudo::Uint)
        || pseudo(Pseudo::Number)
        || pseudo(Pseudo::Scalar)
    {
        Some(Value::Int(0))
    } else if basic(Kind::Float) {
        Some(Value::Float(0.0))
    } else if basic(Kind::String) {
        Some(Value::from(""))
    } else if basic(Kind::Array) || pseudo(Pseudo::Iterable) {
        Some(Value::array(Vec::<Value>::new()))
    } else {
        None
    }
}
