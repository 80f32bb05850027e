use crate::curve::{SnakeCurve, Vector3};
use crate::errors::Result;
use crate::nbt::quote;

/// Command that stores `command` in the block at `cell`.
pub fn install_command(cell: Vector3, command: &str) -> String {
    format!(
        "data modify block ~{} ~{} ~{} Command set value {}",
        cell.x,
        cell.y,
        cell.z,
        quote(command)
    )
}

/// One install command per user command, following the curve from `origin`.
///
/// Fails with `IndexOutOfRange` if the curve has fewer cells than commands.
pub fn install_commands(
    commands: &[String],
    curve: &SnakeCurve,
    origin: Vector3,
) -> Result<Vec<String>> {
    commands
        .iter()
        .enumerate()
        .map(|(i, command)| Ok(install_command(origin + curve.position_at(i)?, command)))
        .collect()
}
