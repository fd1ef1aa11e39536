fn main() -> anyhow::Result<()> {
    snippetgen::init();
    snippetgen::cli::run()
}
