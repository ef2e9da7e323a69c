fn main() -> anyhow::Result<()> {
    vaxdash_lib::run()
}
