//! Static reference data for labelling.
//!
//! Provides:
//! - The sponsor catalog and the auto-populated quick list
//! - Rightsholders and their placement/placement-type configurations
//! - The frame image and detection box pools used by the batch generator
//! - Most-likely sponsor detection from a batch's images

use crate::frame::{DetectionBox, DetectionQuality, Frame};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Maximum length of the auto-populated sponsor list.
pub const AUTO_POPULATED_LIMIT: usize = 9;

/// A label choice offered by the quick-label bar and the picker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Label {
    pub id: String,
    pub name: String,
}

impl Label {
    pub fn new(id: &str, name: &str) -> Self {
        Self { id: id.to_string(), name: name.to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sponsor {
    pub id: &'static str,
    pub name: &'static str,
    pub category: &'static str,
}

impl Sponsor {
    pub fn label(&self) -> Label {
        Label::new(self.id, self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum League {
    Nba,
    Mlb,
    Nfl,
    Mls,
    Nhl,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rightsholder {
    pub id: &'static str,
    pub name: &'static str,
    pub league: League,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementType {
    pub id: &'static str,
    pub name: &'static str,
}

impl PlacementType {
    pub fn label(&self) -> Label {
        Label::new(self.id, self.name)
    }
}

/// Placement types a rightsholder sells for one placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementConfig {
    pub rightsholder: &'static str,
    pub placement: &'static str,
    pub types: Vec<PlacementType>,
}

/// Batch-wide placement choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedPlacement {
    pub rightsholder: String,
    pub placement: String,
}

impl SelectedPlacement {
    pub fn new(rightsholder: &str, placement: &str) -> Self {
        Self { rightsholder: rightsholder.to_string(), placement: placement.to_string() }
    }

    /// The string committed to annotations when this placement is the batch label.
    pub fn display_name(&self) -> String {
        format!("{} - {}", self.rightsholder, self.placement)
    }
}

impl Default for SelectedPlacement {
    fn default() -> Self {
        Self::new("New York Yankees", "Uniform")
    }
}

// ===== Tables =====

fn sponsor(id: &'static str, name: &'static str, category: &'static str) -> Sponsor {
    Sponsor { id, name, category }
}

pub static SPONSORS: Lazy<Vec<Sponsor>> = Lazy::new(|| {
    vec![
        sponsor("nike", "Nike", "Apparel"),
        sponsor("coca-cola", "Coca-Cola", "Beverages"),
        sponsor("mcdonalds", "McDonald's", "Food & Dining"),
        sponsor("adidas", "Adidas", "Apparel"),
        sponsor("toyota", "Toyota", "Automotive"),
        sponsor("mastercard", "Mastercard", "Financial Services"),
        sponsor("pepsi", "Pepsi", "Beverages"),
        sponsor("subway", "Subway", "Food & Dining"),
        sponsor("budweiser", "Budweiser", "Beverages"),
        sponsor("visa", "Visa", "Financial Services"),
        sponsor("ford", "Ford", "Automotive"),
        sponsor("chevrolet", "Chevrolet", "Automotive"),
        sponsor("bmw", "BMW", "Automotive"),
        sponsor("burger-king", "Burger King", "Food & Dining"),
        sponsor("taco-bell", "Taco Bell", "Food & Dining"),
        sponsor("starbucks", "Starbucks", "Food & Dining"),
        sponsor("apple", "Apple", "Technology"),
        sponsor("microsoft", "Microsoft", "Technology"),
        sponsor("google", "Google", "Technology"),
        sponsor("netflix", "Netflix", "Entertainment"),
        sponsor("spotify", "Spotify", "Entertainment"),
        sponsor("amazon", "Amazon", "E-commerce"),
        sponsor("walmart", "Walmart", "Retail"),
        sponsor("target", "Target", "Retail"),
        sponsor("loreal", "L'Oréal", "Beauty"),
        sponsor("kfc", "KFC", "Food & Dining"),
        sponsor("dunkin", "Dunkin' Donuts", "Food & Dining"),
        sponsor("lays", "Lay's", "Food & Dining"),
        sponsor("de-beers", "De Beers", "Jewelry"),
        sponsor("allstate", "Allstate", "Insurance"),
        sponsor("gillette", "Gillette", "Personal Care"),
        sponsor("red-bull", "Red Bull", "Beverages"),
        sponsor("airbnb", "Airbnb", "Travel"),
        sponsor("levis", "Levi's", "Apparel"),
        sponsor("samsung", "Samsung", "Technology"),
        sponsor("kit-kat", "Kit Kat", "Food & Dining"),
        sponsor("playstation", "PlayStation", "Gaming"),
        sponsor("maybelline", "Maybelline", "Beauty"),
        sponsor("pizza-hut", "Pizza Hut", "Food & Dining"),
        sponsor("volkswagen", "Volkswagen", "Automotive"),
        sponsor("dominos", "Domino's", "Food & Dining"),
        sponsor("wendys", "Wendy's", "Food & Dining"),
        sponsor("mms", "M&M's", "Food & Dining"),
        sponsor("snickers", "Snickers", "Food & Dining"),
        sponsor("heineken", "Heineken", "Beverages"),
        sponsor("corona", "Corona", "Beverages"),
        sponsor("absolut", "Absolut", "Beverages"),
        sponsor("johnnie-walker", "Johnnie Walker", "Beverages"),
        sponsor("bacardi", "Bacardi", "Beverages"),
        sponsor("monster-energy", "Monster Energy", "Beverages"),
        sponsor("mercedes-benz", "Mercedes-Benz", "Automotive"),
        sponsor("audi", "Audi", "Automotive"),
        sponsor("honda", "Honda", "Automotive"),
        sponsor("hyundai", "Hyundai", "Automotive"),
        sponsor("jeep", "Jeep", "Automotive"),
        sponsor("porsche", "Porsche", "Automotive"),
        sponsor("lexus", "Lexus", "Automotive"),
        sponsor("nissan", "Nissan", "Automotive"),
        sponsor("under-armour", "Under Armour", "Apparel"),
        sponsor("puma", "Puma", "Apparel"),
        sponsor("the-north-face", "The North Face", "Apparel"),
        sponsor("reebok", "Reebok", "Apparel"),
        sponsor("chick-fil-a", "Chick-fil-A", "Food & Dining"),
        sponsor("coors-light", "Coors Light", "Beverages"),
        sponsor("dignity-health", "Dignity Health", "Healthcare"),
        sponsor("chase", "Chase", "Financial Services"),
        sponsor("banner-health", "Banner Health", "Healthcare"),
        sponsor("cox", "Cox", "Telecommunications"),
        sponsor("state-farm", "State Farm", "Insurance"),
        sponsor("geico", "GEICO", "Insurance"),
        sponsor("progressive", "Progressive", "Insurance"),
    ]
});

fn rightsholder(id: &'static str, name: &'static str, league: League) -> Rightsholder {
    Rightsholder { id, name, league }
}

pub static RIGHTSHOLDERS: Lazy<Vec<Rightsholder>> = Lazy::new(|| {
    use League::*;
    vec![
        rightsholder("ny-knicks", "New York Knicks", Nba),
        rightsholder("la-lakers", "Los Angeles Lakers", Nba),
        rightsholder("boston-celtics", "Boston Celtics", Nba),
        rightsholder("chicago-bulls", "Chicago Bulls", Nba),
        rightsholder("miami-heat", "Miami Heat", Nba),
        rightsholder("golden-state-warriors", "Golden State Warriors", Nba),
        rightsholder("dallas-mavericks", "Dallas Mavericks", Nba),
        rightsholder("phoenix-suns", "Phoenix Suns", Nba),
        rightsholder("denver-nuggets", "Denver Nuggets", Nba),
        rightsholder("toronto-raptors", "Toronto Raptors", Nba),
        rightsholder("ny-yankees", "New York Yankees", Mlb),
        rightsholder("la-dodgers", "Los Angeles Dodgers", Mlb),
        rightsholder("boston-red-sox", "Boston Red Sox", Mlb),
        rightsholder("chicago-cubs", "Chicago Cubs", Mlb),
        rightsholder("houston-astros", "Houston Astros", Mlb),
        rightsholder("atlanta-braves", "Atlanta Braves", Mlb),
        rightsholder("philadelphia-phillies", "Philadelphia Phillies", Mlb),
        rightsholder("san-francisco-giants", "San Francisco Giants", Mlb),
        rightsholder("st-louis-cardinals", "St. Louis Cardinals", Mlb),
        rightsholder("tampa-bay-rays", "Tampa Bay Rays", Mlb),
        rightsholder("ny-giants", "New York Giants", Nfl),
        rightsholder("la-rams", "Los Angeles Rams", Nfl),
        rightsholder("new-england-patriots", "New England Patriots", Nfl),
        rightsholder("chicago-bears", "Chicago Bears", Nfl),
        rightsholder("dallas-cowboys", "Dallas Cowboys", Nfl),
        rightsholder("green-bay-packers", "Green Bay Packers", Nfl),
        rightsholder("pittsburgh-steelers", "Pittsburgh Steelers", Nfl),
        rightsholder("san-francisco-49ers", "San Francisco 49ers", Nfl),
        rightsholder("kansas-city-chiefs", "Kansas City Chiefs", Nfl),
        rightsholder("buffalo-bills", "Buffalo Bills", Nfl),
        rightsholder("nycfc", "New York City FC", Mls),
        rightsholder("lafc", "Los Angeles FC", Mls),
        rightsholder("ne-revolution", "New England Revolution", Mls),
        rightsholder("chicago-fire", "Chicago Fire FC", Mls),
        rightsholder("atlanta-united", "Atlanta United FC", Mls),
        rightsholder("inter-miami", "Inter Miami CF", Mls),
        rightsholder("portland-timbers", "Portland Timbers", Mls),
        rightsholder("seattle-sounders", "Seattle Sounders FC", Mls),
        rightsholder("toronto-fc", "Toronto FC", Mls),
        rightsholder("dc-united", "D.C. United", Mls),
        rightsholder("ny-rangers", "New York Rangers", Nhl),
        rightsholder("la-kings", "Los Angeles Kings", Nhl),
        rightsholder("boston-bruins", "Boston Bruins", Nhl),
        rightsholder("chicago-blackhawks", "Chicago Blackhawks", Nhl),
        rightsholder("tampa-bay-lightning", "Tampa Bay Lightning", Nhl),
        rightsholder("vegas-golden-knights", "Vegas Golden Knights", Nhl),
        rightsholder("colorado-avalanche", "Colorado Avalanche", Nhl),
        rightsholder("toronto-maple-leafs", "Toronto Maple Leafs", Nhl),
        rightsholder("florida-panthers", "Florida Panthers", Nhl),
        rightsholder("pittsburgh-penguins", "Pittsburgh Penguins", Nhl),
    ]
});

fn config(rightsholder: &'static str, placement: &'static str, types: &[(&'static str, &'static str)]) -> PlacementConfig {
    PlacementConfig {
        rightsholder,
        placement,
        types: types.iter().map(|&(id, name)| PlacementType { id, name }).collect(),
    }
}

pub static PLACEMENT_CONFIGS: Lazy<Vec<PlacementConfig>> = Lazy::new(|| {
    vec![
        config("New York Knicks", "Uniform", &[
            ("nba-jersey", "Jersey"),
            ("nba-shorts", "Shorts"),
            ("nba-shoes", "Shoes"),
            ("nba-warmups", "Warm-ups"),
            ("nba-headband", "Headband"),
        ]),
        config("New York Knicks", "Court/Field", &[
            ("nba-court-logo", "Court Logo"),
            ("nba-baseline", "Baseline"),
            ("nba-sideline", "Sideline"),
            ("nba-three-point", "Three-Point Line"),
        ]),
        config("New York Knicks", "LED/Fascia", &[
            ("nba-led-courtside", "Courtside LED"),
            ("nba-fascia", "Fascia"),
            ("nba-ribbon", "Ribbon Board"),
        ]),
        config("New York Yankees", "Uniform", &[
            ("mlb-jersey-front", "Jersey Front"),
            ("mlb-jersey-back", "Jersey Back"),
            ("mlb-baseball-cap", "Baseball Cap"),
            ("mlb-cleats", "Cleats"),
            ("mlb-gloves", "Gloves"),
            ("mlb-batting-helmet", "Batting Helmet"),
        ]),
        config("New York Yankees", "Court/Field", &[
            ("mlb-pitchers-mound", "Pitcher's Mound"),
            ("mlb-home-plate", "Home Plate Area"),
            ("mlb-bases", "Base Paths"),
            ("mlb-outfield", "Outfield Wall"),
            ("mlb-foul-territory", "Foul Territory"),
        ]),
        config("New York Yankees", "Billboard", &[
            ("mlb-outfield-board", "Outfield Billboard"),
            ("mlb-foul-pole", "Foul Pole"),
            ("mlb-backstop", "Backstop"),
        ]),
        config("New York Giants", "Uniform", &[
            ("nfl-jersey", "Jersey"),
            ("nfl-pants", "Pants"),
            ("nfl-helmet", "Helmet"),
            ("nfl-cleats", "Cleats"),
            ("nfl-gloves", "Gloves"),
            ("nfl-towel", "Towel"),
        ]),
        config("New York Giants", "Court/Field", &[
            ("nfl-midfield", "Midfield Logo"),
            ("nfl-endzone", "End Zone"),
            ("nfl-sideline", "Sideline"),
            ("nfl-goal-posts", "Goal Posts"),
        ]),
        config("New York City FC", "Uniform", &[
            ("mls-jersey", "Jersey"),
            ("mls-shorts", "Shorts"),
            ("mls-cleats", "Cleats"),
            ("mls-shin-guards", "Shin Guards"),
            ("mls-captain-armband", "Captain Armband"),
        ]),
        config("Tampa Bay Lightning", "Uniform", &[
            ("nhl-jersey-lightning", "Jersey"),
            ("nhl-pants-lightning", "Pants"),
            ("nhl-helmet-lightning", "Helmet"),
            ("nhl-skates-lightning", "Skates"),
        ]),
    ]
});

/// Image pool cycled through by generated batches.
pub static FRAME_IMAGES: Lazy<Vec<String>> = Lazy::new(|| {
    [
        0, 1, 30, 90, 120, 150, 180, 210, 240, 270, 360, 480, 630, 2040, 2160, 2220, 2280, 2340,
        2400, 2460, 2520, 2580, 2700, 2760, 2820,
    ]
    .iter()
    .map(|n| format!("/images/frame_{}.jpg", n))
    .collect()
});

fn detection(x: f32, y: f32, width: f32, height: f32, clear: bool) -> DetectionBox {
    let quality = if clear { DetectionQuality::Clear } else { DetectionQuality::Unclear };
    DetectionBox { x, y, width, height, quality }
}

/// Pre-baked detection rectangles cycled through by generated batches.
pub static DETECTION_BOXES: Lazy<Vec<DetectionBox>> = Lazy::new(|| {
    vec![
        detection(10.0, 15.0, 25.0, 12.0, true),
        detection(70.0, 8.0, 20.0, 10.0, true),
        detection(45.0, 75.0, 30.0, 15.0, true),
        detection(5.0, 45.0, 18.0, 20.0, true),
        detection(75.0, 55.0, 20.0, 12.0, true),
        detection(25.0, 25.0, 22.0, 8.0, true),
        detection(85.0, 85.0, 12.0, 8.0, true),
        detection(15.0, 85.0, 25.0, 6.0, true),
        detection(55.0, 40.0, 15.0, 10.0, false),
        detection(35.0, 10.0, 18.0, 8.0, false),
        detection(90.0, 25.0, 8.0, 12.0, false),
        detection(2.0, 5.0, 12.0, 6.0, false),
        detection(60.0, 65.0, 12.0, 15.0, false),
        detection(25.0, 50.0, 20.0, 8.0, false),
        detection(80.0, 40.0, 15.0, 6.0, false),
        detection(50.0, 20.0, 25.0, 10.0, true),
        detection(8.0, 65.0, 15.0, 18.0, true),
        detection(65.0, 30.0, 20.0, 12.0, false),
        detection(40.0, 85.0, 15.0, 8.0, true),
        detection(12.0, 30.0, 20.0, 8.0, false),
        detection(75.0, 75.0, 18.0, 10.0, true),
        detection(30.0, 60.0, 12.0, 12.0, false),
        detection(85.0, 15.0, 10.0, 15.0, true),
        detection(5.0, 75.0, 8.0, 12.0, false),
        detection(55.0, 5.0, 20.0, 6.0, true),
    ]
});

const AUTO_POPULATED_IDS: [&str; AUTO_POPULATED_LIMIT] = [
    "coca-cola",
    "chick-fil-a",
    "coors-light",
    "nike",
    "chase",
    "budweiser",
    "pepsi",
    "adidas",
    "dignity-health",
];

// ===== Lookups =====

pub fn sponsor_by_id(id: &str) -> Option<&'static Sponsor> {
    SPONSORS.iter().find(|s| s.id == id)
}

pub fn rightsholder_by_id(id: &str) -> Option<&'static Rightsholder> {
    RIGHTSHOLDERS.iter().find(|r| r.id == id)
}

pub fn rightsholders_in(league: League) -> Vec<&'static Rightsholder> {
    RIGHTSHOLDERS.iter().filter(|r| r.league == league).collect()
}

/// Distinct placement names configured for a rightsholder, in table order.
pub fn placements_for(rightsholder_name: &str) -> Vec<&'static str> {
    let mut placements: Vec<&'static str> = Vec::new();
    for config in PLACEMENT_CONFIGS.iter().filter(|c| c.rightsholder == rightsholder_name) {
        if !placements.contains(&config.placement) {
            placements.push(config.placement);
        }
    }
    placements
}

/// Placement types for a rightsholder/placement pair; empty when not configured.
pub fn placement_types_for(rightsholder_name: &str, placement_name: &str) -> &'static [PlacementType] {
    PLACEMENT_CONFIGS
        .iter()
        .find(|c| c.rightsholder == rightsholder_name && c.placement == placement_name)
        .map(|c| c.types.as_slice())
        .unwrap_or(&[])
}

/// The sponsors pre-filled into the quick-label bar.
///
/// Known ids come first in their fixed order; the list is topped up from the
/// catalog if any are missing.
pub fn auto_populated_sponsors() -> Vec<&'static Sponsor> {
    let mut sponsors: Vec<&'static Sponsor> = AUTO_POPULATED_IDS.iter().filter_map(|id| sponsor_by_id(id)).collect();
    if sponsors.len() < AUTO_POPULATED_LIMIT {
        let missing = AUTO_POPULATED_LIMIT - sponsors.len();
        sponsors.extend(
            SPONSORS
                .iter()
                .filter(|s| !AUTO_POPULATED_IDS.contains(&s.id))
                .take(missing),
        );
    }
    sponsors.truncate(AUTO_POPULATED_LIMIT);
    sponsors
}

fn likely_sponsors_for_image(image_index: usize) -> [&'static str; 3] {
    match image_index {
        0 => ["coca-cola", "budweiser", "mastercard"],
        1 => ["nike", "adidas", "pepsi"],
        2 => ["state-farm", "geico", "chevrolet"],
        3 => ["nike", "budweiser", "coca-cola"],
        4 => ["nike", "coca-cola", "pepsi"],
        5 => ["coca-cola", "nike", "pepsi"],
        6 => ["dignity-health", "mcdonalds", "coca-cola"],
        7 => ["chick-fil-a", "chase", "coca-cola"],
        8 => ["coors-light", "banner-health", "cox"],
        _ => ["coca-cola", "pepsi", "budweiser"],
    }
}

/// Scores sponsors by the images in `frames` and returns the highest scorer.
///
/// Clear detections weigh 1.0, unclear ones 0.5. Ties go to the sponsor that
/// scored first. Frames whose image is not in the pool are skipped.
pub fn detect_most_likely_sponsor(frames: &[Frame]) -> Option<&'static Sponsor> {
    let mut scores: Vec<(&'static str, f32)> = Vec::new();

    for frame in frames {
        let Some(image_index) = FRAME_IMAGES.iter().position(|img| *img == frame.image_url) else {
            continue;
        };
        let weight = match frame.detection_box.quality {
            DetectionQuality::Clear => 1.0,
            DetectionQuality::Unclear => 0.5,
        };
        for id in likely_sponsors_for_image(image_index) {
            match scores.iter_mut().find(|(existing, _)| *existing == id) {
                Some((_, score)) => *score += weight,
                None => scores.push((id, weight)),
            }
        }
    }

    let mut best: Option<(&'static str, f32)> = None;
    for (id, score) in scores {
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((id, score));
        }
    }
    best.and_then(|(id, _)| sponsor_by_id(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::FrameId;

    fn frame_with_image(image_index: usize, quality: DetectionQuality) -> Frame {
        let mut detection_box = DETECTION_BOXES[0];
        detection_box.quality = quality;
        Frame::new(FrameId::from("f"), FRAME_IMAGES[image_index].clone(), detection_box, 3)
    }

    #[test]
    fn test_default_placement_types() {
        let placement = SelectedPlacement::default();
        let types = placement_types_for(&placement.rightsholder, &placement.placement);
        let ids: Vec<&str> = types.iter().map(|t| t.id).collect();
        assert_eq!(
            ids,
            vec!["mlb-jersey-front", "mlb-jersey-back", "mlb-baseball-cap", "mlb-cleats", "mlb-gloves", "mlb-batting-helmet"]
        );
        assert_eq!(placement.display_name(), "New York Yankees - Uniform");
    }

    #[test]
    fn test_unknown_placement_has_no_types() {
        assert!(placement_types_for("New York Yankees", "Venue Branding").is_empty());
        assert!(placement_types_for("Nobody", "Uniform").is_empty());
    }

    #[test]
    fn test_placements_for_rightsholder() {
        assert_eq!(placements_for("New York Yankees"), vec!["Uniform", "Court/Field", "Billboard"]);
    }

    #[test]
    fn test_auto_populated_sponsors() {
        let ids: Vec<&str> = auto_populated_sponsors().iter().map(|s| s.id).collect();
        assert_eq!(ids, AUTO_POPULATED_IDS.to_vec());
    }

    #[test]
    fn test_lookups() {
        assert_eq!(sponsor_by_id("geico").map(|s| s.name), Some("GEICO"));
        assert!(sponsor_by_id("unknown").is_none());
        assert_eq!(rightsholder_by_id("ny-yankees").map(|r| r.league), Some(League::Mlb));
        assert_eq!(rightsholders_in(League::Nhl).len(), 10);
    }

    #[test]
    fn test_pools_have_matching_length() {
        assert_eq!(FRAME_IMAGES.len(), 25);
        assert_eq!(DETECTION_BOXES.len(), 25);
        assert_eq!(FRAME_IMAGES[2], "/images/frame_30.jpg");
    }

    #[test]
    fn test_detect_most_likely_sponsor_weights_quality() {
        // Image 2 leads with state-farm on a clear detection; two unclear
        // frames of image 1 only reach 1.0 for nike.
        let frames = vec![
            frame_with_image(2, DetectionQuality::Clear),
            frame_with_image(2, DetectionQuality::Clear),
            frame_with_image(1, DetectionQuality::Unclear),
            frame_with_image(1, DetectionQuality::Unclear),
        ];
        assert_eq!(detect_most_likely_sponsor(&frames).map(|s| s.id), Some("state-farm"));
    }

    #[test]
    fn test_detect_most_likely_sponsor_empty() {
        assert!(detect_most_likely_sponsor(&[]).is_none());
        let mut frame = frame_with_image(0, DetectionQuality::Clear);
        frame.image_url = "/elsewhere.jpg".into();
        assert!(detect_most_likely_sponsor(&[frame]).is_none());
    }
}
