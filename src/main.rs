#[macro_use]
extern crate rocket;

use blog_posts::config::Config;
use blog_posts::{create_rocket, db};

#[launch]
fn rocket() -> _ {
    let config = Config::from_env();
    let conn = db::open(&config.database_path).expect("Failed to open database");
    db::initialize(&conn).expect("Failed to initialize database");
    create_rocket(conn)
}
