fn main() -> anyhow::Result<()> {
    unitgraph_lib::main()
}
