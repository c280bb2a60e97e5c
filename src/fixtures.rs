//! Disposable blog-post records for populating a database under test, plus
//! the seed and teardown steps that bracket each test case.

use rand::Rng;
use rusqlite::Connection;

use crate::db;
use crate::models::{Author, BlogPost, NewBlogPost};

/// Number of posts inserted before each test case.
pub const DEFAULT_SEED_COUNT: usize = 10;

pub const FIRST_NAMES: [&str; 7] = ["Destiney", "Omari", "Ryder", "Khloe", "Hunter", "Lane", "Laylah"];

pub const LAST_NAMES: [&str; 7] = ["Estes", "Moon", "Willis", "York", "Woodard", "Knight", "Ferrell"];

pub const TITLES: [&str; 6] = [
    "Lonely Gate",
    "The Whispering Vision",
    "Tower of Birth",
    "The Gift's Truth",
    "The Heat of the End",
    "Tales in the Name",
];

pub const CONTENTS: [&str; 7] = [
    "Certainly elsewhere my do allowance at. The address farther six hearted hundred towards husband. Are securing off occasion remember daughter replying. Held that feel his see own yet. Strangers ye to he sometimes propriety in. She right plate seven has. Bed who perceive judgment did marianne.",
    "Out believe has request not how comfort evident. Up delight cousins we feeling minutes. Genius has looked end piqued spring. Down has rose feel find man. Learning day desirous informed expenses material returned six the. She enabled invited exposed him another. Reasonably conviction solicitude me mr at discretion reasonable. Age out full gate bed day lose.",
    "Extremely we promotion remainder eagerness enjoyment an. Ham her demands removal brought minuter raising invited gay. Contented consisted continual curiosity contained get sex. Forth child dried in in aware do. You had met they song how feel lain evil near. Small she avoid six yet table china. And bed make say been then dine mrs. To household rapturous fulfilled attempted on so.",
    "Full he none no side. Uncommonly surrounded considered for him are its. It we is read good soon. My to considered delightful invitation announcing of no decisively boisterous. Did add dashwoods deficient man concluded additions resources. Or landlord packages overcame distance smallest in recurred. Wrong maids or be asked no on enjoy. Household few sometimes out attending described. Lain just fact four of am meet high.",
    "Sociable on as carriage my position weddings raillery consider. Peculiar trifling absolute and wandered vicinity property yet. The and collecting motionless difficulty son. His hearing staying ten colonel met. Sex drew six easy four dear cold deny. Moderate children at of outweigh it. Unsatiable it considered invitation he travelling insensible. Consulted admitting oh mr up as described acuteness propriety moonlight.",
    "Situation admitting promotion at or to perceived be. Mr acuteness we as estimable enjoyment up. An held late as felt know. Learn do allow solid to grave. Middleton suspicion age her attention. Chiefly several bed its wishing. Is so moments on chamber pressed to. Doubtful yet way properly answered humanity its desirous. Minuter believe service arrived civilly add all. Acuteness allowance an at eagerness favourite in extensive exquisite ye.",
    "No in he real went find mr. Wandered or strictly raillery stanhill as. Jennings appetite disposed me an at subjects an. To no indulgence diminution so discovered mr apartments. Are off under folly death wrote cause her way spite. Plan upon yet way get cold spot its week. Almost do am or limits hearts. Resolve parties but why she shewing. She sang know now how nay cold real case.",
];

fn pick<R: Rng + ?Sized>(rng: &mut R, pool: &[&str]) -> String {
    pool[rng.gen_range(0..pool.len())].to_string()
}

/// Draws every field independently and uniformly from its pool.
pub fn generate_record_with<R: Rng + ?Sized>(rng: &mut R) -> NewBlogPost {
    NewBlogPost {
        author: Author {
            first_name: pick(rng, &FIRST_NAMES),
            last_name: pick(rng, &LAST_NAMES),
        },
        title: pick(rng, &TITLES),
        content: pick(rng, &CONTENTS),
    }
}

pub fn generate_record() -> NewBlogPost {
    generate_record_with(&mut rand::thread_rng())
}

pub fn generate_records(n: usize) -> Vec<NewBlogPost> {
    let mut rng = rand::thread_rng();
    (0..n).map(|_| generate_record_with(&mut rng)).collect()
}

/// Bulk-inserts `n` fresh fixtures and returns them as stored.
pub fn seed(conn: &mut Connection, n: usize) -> rusqlite::Result<Vec<BlogPost>> {
    log::info!("seeding {} blog posts", n);
    db::insert_many(conn, &generate_records(n))
}

/// Wipes the whole working dataset. Test isolation only.
pub fn teardown(conn: &Connection) -> rusqlite::Result<()> {
    log::warn!("deleting database");
    db::drop_database(conn)
}
