use crate::{id::Id, value::Value};
use serde_json::Map;
use std::collections::BTreeMap;

///
/// Declared
///
/// Anything a record can hand to a validator: typed Rust fields or loose
/// `Value` declarations. `None` and `Value::Null` both mean absent.
///

pub trait Declared {
    fn declared(&self) -> Option<Value>;
}

impl Declared for Value {
    fn declared(&self) -> Option<Value> {
        match self {
            Self::Null => None,
            other => Some(other.clone()),
        }
    }
}

impl<T: Declared> Declared for Option<T> {
    fn declared(&self) -> Option<Value> {
        self.as_ref().and_then(Declared::declared)
    }
}

impl<T: Declared + ?Sized> Declared for &T {
    fn declared(&self) -> Option<Value> {
        (**self).declared()
    }
}

macro_rules! impl_declared_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Declared for $ty {
                fn declared(&self) -> Option<Value> {
                    Some(Value::from(*self))
                }
            }
        )*
    };
}

impl_declared_scalar!(bool, i8, i16, i32, i64, u8, u16, u32, u64, usize, f32, f64);

impl Declared for str {
    fn declared(&self) -> Option<Value> {
        Some(Value::String(self.to_string()))
    }
}

impl Declared for String {
    fn declared(&self) -> Option<Value> {
        self.as_str().declared()
    }
}

impl Declared for Id {
    fn declared(&self) -> Option<Value> {
        Some(Value::from(self))
    }
}

impl<T: Declared> Declared for [T] {
    fn declared(&self) -> Option<Value> {
        Some(Value::Array(
            self.iter()
                .map(|item| item.declared().unwrap_or(Value::Null))
                .collect(),
        ))
    }
}

impl<T: Declared> Declared for Vec<T> {
    fn declared(&self) -> Option<Value> {
        self.as_slice().declared()
    }
}

impl<T: Declared, const N: usize> Declared for [T; N] {
    fn declared(&self) -> Option<Value> {
        self.as_slice().declared()
    }
}

impl<A: Declared, B: Declared> Declared for (A, B) {
    fn declared(&self) -> Option<Value> {
        Some(Value::Array(vec![
            self.0.declared().unwrap_or(Value::Null),
            self.1.declared().unwrap_or(Value::Null),
        ]))
    }
}

impl<K: AsRef<str>, T: Declared> Declared for BTreeMap<K, T> {
    fn declared(&self) -> Option<Value> {
        let map: Map<String, Value> = self
            .iter()
            .map(|(k, v)| (k.as_ref().to_string(), v.declared().unwrap_or(Value::Null)))
            .collect();

        Some(Value::Object(map))
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_and_none_are_absent() {
        assert_eq!(Value::Null.declared(), None);
        assert_eq!(Option::<i64>::None.declared(), None);
        assert_eq!(Some(Value::Null).declared(), None);
    }

    #[test]
    fn typed_fields_convert_to_values() {
        assert_eq!(3_i64.declared(), Some(json!(3)));
        assert_eq!("x".declared(), Some(json!("x")));
        assert_eq!(vec![1_i64, 2].declared(), Some(json!([1, 2])));
        assert_eq!((0_i64, 10_i64).declared(), Some(json!([0, 10])));

        let mut map = BTreeMap::new();
        map.insert("Attack", vec![1.5_f64]);
        assert_eq!(map.declared(), Some(json!({ "Attack": [1.5] })));
    }
}
