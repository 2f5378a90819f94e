use crate::core::value::Value;

/// One positional row of a tabular result, aligned with its schema's columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    values: Vec<Value>,
}

impl Row {
    pub fn new(values: Vec<Value>) -> Self {
        Row { values }
    }

    pub fn get(&self, column: usize) -> Option<&Value> {
        self.values.get(column)
    }

    /// Moves the value out of `column`, leaving `Null` behind.
    pub fn take(&mut self, column: usize) -> Value {
        self.values
            .get_mut(column)
            .map(std::mem::take)
            .unwrap_or(Value::Null)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

impl From<Vec<Value>> for Row {
    fn from(values: Vec<Value>) -> Self {
        Row::new(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_leaves_null_and_tolerates_short_rows() {
        let mut row = Row::from(vec![Value::Long(1), Value::from("a")]);

        assert_eq!(row.take(1), Value::from("a"));
        assert_eq!(row.get(1), Some(&Value::Null));
        assert_eq!(row.take(5), Value::Null);
        assert_eq!(row.len(), 2);
    }
}
