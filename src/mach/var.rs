use super::Val;
use std::collections::BTreeMap;

/// ## Variable memory
///
/// Scalar variables and arrays, both addressed by a small integer id.
/// Reading an id that was never written materializes it with a zero
/// (or empty) default, so the id shows up in later snapshots.

#[derive(Debug, Default, Clone)]
pub struct Var {
    vars: BTreeMap<i32, Val>,
    arrays: BTreeMap<i32, Vec<Val>>,
}

impl Var {
    pub fn new() -> Var {
        Var::default()
    }

    pub fn clear(&mut self) {
        self.vars.clear();
        self.arrays.clear();
    }

    /// Read-or-default-and-materialize.
    pub fn fetch(&mut self, id: i32) -> Val {
        *self.vars.entry(id).or_insert(Val::ZERO)
    }

    pub fn store(&mut self, id: i32, value: Val) {
        self.vars.insert(id, value);
    }

    /// Read-or-default-and-materialize for arrays.
    pub fn array(&mut self, id: i32) -> &mut Vec<Val> {
        self.arrays.entry(id).or_insert_with(Vec::new)
    }

    pub fn store_array(&mut self, id: i32, array: Vec<Val>) {
        self.arrays.insert(id, array);
    }

    /// Resizes an array, zero filling any newly exposed tail.
    pub fn resize_array(&mut self, id: i32, len: usize) {
        self.array(id).resize(len, Val::ZERO);
    }

    pub fn vars(&self) -> &BTreeMap<i32, Val> {
        &self.vars
    }

    pub fn arrays(&self) -> &BTreeMap<i32, Vec<Val>> {
        &self.arrays
    }
}
