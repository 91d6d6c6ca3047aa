use super::Val;
use crate::error;
use crate::mach::Error;

type Result<T> = std::result::Result<T, Error>;

/// One element of the execution stack. Arrays are snapshots taken at push time.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Val(Val),
    Array(Vec<Val>),
}

/// ## Execution stack
///
/// Last in, first out. A typed pop leaves the stack untouched on failure.

#[derive(Default, Clone)]
pub struct Stack {
    vec: Vec<Entry>,
}

impl std::fmt::Debug for Stack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.vec)
    }
}

impl Stack {
    pub fn new() -> Stack {
        Stack::default()
    }
    fn underflow_error(&self) -> Error {
        error!(StackEmpty; "Attempting to pop off an empty stack.")
    }
    pub fn clear(&mut self) {
        self.vec.clear()
    }
    pub fn len(&self) -> usize {
        self.vec.len()
    }
    pub fn is_empty(&self) -> bool {
        self.vec.is_empty()
    }
    pub fn last(&self) -> Option<&Entry> {
        self.vec.last()
    }
    pub fn entries(&self) -> &[Entry] {
        &self.vec
    }
    pub fn push(&mut self, val: Val) {
        self.vec.push(Entry::Val(val))
    }
    pub fn push_array(&mut self, array: &[Val]) {
        self.vec.push(Entry::Array(array.to_vec()))
    }
    pub fn pop(&mut self) -> Result<Val> {
        match self.vec.last() {
            None => Err(self.underflow_error()),
            Some(Entry::Array(_)) => Err(error!(TypeMismatch;
                "Popping an array off the stack, but attempting to store it in a value.")),
            Some(Entry::Val(val)) => {
                let val = *val;
                self.vec.pop();
                Ok(val)
            }
        }
    }
    pub fn pop_array(&mut self) -> Result<Vec<Val>> {
        match self.vec.last() {
            None => Err(self.underflow_error()),
            Some(Entry::Val(_)) => Err(error!(TypeMismatch;
                "Popping a value off the stack, but attempting to store it in an array.")),
            Some(Entry::Array(_)) => match self.vec.pop() {
                Some(Entry::Array(array)) => Ok(array),
                _ => Err(error!(InternalError; "STACK CORRUPTED")),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mach::ErrorCode;

    #[test]
    fn test_lifo() {
        let mut stack = Stack::new();
        for i in 0..5 {
            stack.push(Val::from(i as f32 + 0.25));
        }
        for i in (0..5).rev() {
            assert_eq!(stack.pop().unwrap(), Val::from(i as f32 + 0.25));
        }
        assert!(stack.pop().unwrap_err().is(ErrorCode::StackEmpty));
    }

    #[test]
    fn test_mismatch_leaves_stack_unchanged() {
        let mut stack = Stack::new();
        stack.push(Val::from(1));
        assert!(stack.pop_array().unwrap_err().is(ErrorCode::TypeMismatch));
        assert_eq!(stack.len(), 1);
        stack.push_array(&[Val::from(2)]);
        assert!(stack.pop().unwrap_err().is(ErrorCode::TypeMismatch));
        assert_eq!(stack.pop_array().unwrap(), vec![Val::from(2)]);
        assert_eq!(stack.pop().unwrap(), Val::from(1));
    }

    #[test]
    fn test_array_is_a_snapshot() {
        let mut stack = Stack::new();
        let mut array = vec![Val::from(1)];
        stack.push_array(&array);
        array[0] = Val::from(5);
        assert_eq!(stack.last(), Some(&Entry::Array(vec![Val::from(1)])));
    }
}
