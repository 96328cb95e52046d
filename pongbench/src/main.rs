fn main() -> anyhow::Result<()> {
    pongbench::run()
}
