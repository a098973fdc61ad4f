fn main() -> eframe::Result {
    flatini::run_gui()
}
