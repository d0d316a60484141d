use crate::error::PortError;
use crate::metadata::{KeyValue, Literal};

/// Endpoint configuration key holding the listening port.
pub const PORT_KEY: &str = "port";

/// Finds the `port` entry of an endpoint binding and parses it.
///
/// The first `port` key wins. Integer literals and numeric strings are
/// accepted; anything else, or a value outside the `u16` range, is a
/// [`PortError::Parse`].
pub fn extract_port(binding: &[KeyValue]) -> Result<u16, PortError> {
    let entry = binding
        .iter()
        .find(|kv| kv.key == PORT_KEY)
        .ok_or(PortError::NotFound)?;
    parse_port(&entry.value)
}

pub(crate) fn parse_port(value: &Literal) -> Result<u16, PortError> {
    let invalid = || PortError::Parse {
        value: value.to_string(),
    };
    match value {
        Literal::Int(i) => u16::try_from(*i).map_err(|_| invalid()),
        Literal::Str(s) => s.trim().parse::<u16>().map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}
