fn main() -> anyhow::Result<()> {
    session_explorer::cli::run()
}
