fn main() -> anyhow::Result<()> {
    bookchat_app::run()
}
