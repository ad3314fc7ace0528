/// One appended row of the comparison table: a scenario name and its impact
/// values, in method order. Never mutated after insertion.
#[derive(Clone, Debug, PartialEq)]
pub struct ScenarioResult {
    pub name: String,
    pub impacts: Vec<f64>,
}

/// Append-only comparison table of scenario results.
///
/// Rows are named `result {n}` from a monotonically increasing counter that
/// starts at 1 and is never reused, not even after [`ResultTable::clear`].
#[derive(Default)]
pub struct ResultTable {
    rows: Vec<ScenarioResult>,
    appended: usize,
}

impl ResultTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The name the next appended row will receive.
    pub fn next_name(&self) -> String {
        format!("result {}", self.appended + 1)
    }

    /// The only mutator besides [`ResultTable::clear`].
    pub fn push(&mut self, impacts: Vec<f64>) -> &ScenarioResult {
        let name = self.next_name();
        self.appended += 1;
        self.rows.push(ScenarioResult { name, impacts });
        &self.rows[self.rows.len() - 1]
    }

    /// Drop all rows but keep the naming counter running.
    pub fn clear(&mut self) {
        self.rows.clear();
    }

    pub fn rows(&self) -> &[ScenarioResult] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
