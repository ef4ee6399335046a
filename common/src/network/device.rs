/// The controller a diagnosis runs against.
///
/// `date` and `time` are the local wall clock at session start, formatted as
/// `YYYY-MM-DD` and `HH:MM:SS`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceContext {
    pub address: String,
    pub date: String,
    pub time: String,
}

impl DeviceContext {
    pub fn new(address: impl Into<String>, date: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            date: date.into(),
            time: time.into(),
        }
    }

    /// Context for data that did not come from a live session (offline dumps).
    pub fn offline(label: impl Into<String>) -> Self {
        Self::new(label, "", "")
    }
}
