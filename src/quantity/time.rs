use std::ops::Div;

quantity!(Hours, "h");

/// Ratio of two durations, used for the stack replacement count.
impl Div for Hours {
    type Output = f64;

    fn div(self, rhs: Self) -> Self::Output {
        self.0 / rhs.0
    }
}
