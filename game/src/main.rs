use macroquad::window::next_frame;

use wallblast::game_app::App;

#[macroquad::main("Wallblast")]
async fn main() {
    let start = std::env::args().nth(1);
    let mut app = App::new(start.as_deref());
    while app.tick() {
        next_frame().await;
    }
}
