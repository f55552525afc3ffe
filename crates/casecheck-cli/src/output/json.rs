use casecheck_core::error::CasecheckError;
use serde::Serialize;

pub fn print<T: Serialize + ?Sized>(value: &T) -> Result<(), CasecheckError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
