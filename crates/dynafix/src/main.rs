fn main() -> anyhow::Result<()> {
    dynafix_lib::main()
}
