fn main() {
    git_tabs::cli::run();
}
