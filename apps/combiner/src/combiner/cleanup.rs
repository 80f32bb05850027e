/// Commands appended to every chunk, run after its payload.
///
/// Clears the root block's command so the chain is not re-triggered, tears
/// down the support stack when it was summoned, and removes the minecarts.
pub fn cleanup_commands(support_blocks: bool) -> Vec<String> {
    let mut commands = vec![r#"data modify block ~ ~-3 ~ Command set value """#.to_string()];
    if support_blocks {
        commands.push(
            r#"setblock ~ ~-2 ~ command_block{auto:1b,Command:"fill ~ ~ ~ ~ ~2 ~ air"}"#.to_string(),
        );
        // One fire buffer still lands after the stack is removed.
        commands.push("kill @e[type=falling_block,distance=..1]".to_string());
    }
    commands.push("kill @e[type=command_block_minecart,distance=..1]".to_string());
    commands
}
