fn main() -> anyhow::Result<()> {
    chat_history_explorer::cli::commands::run()
}
