fn main() {
    tube::term::main();
}
