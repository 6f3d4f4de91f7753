//! Default catalog written on first boot

use rust_decimal::Decimal;
use shared::LocalizedText;
use shared::models::{MenuItem, Room, RoomType};

struct RoomSeed {
    id: &'static str,
    en: &'static str,
    mm: &'static str,
    room_type: RoomType,
    capacity: u32,
    hourly_rate: i64,
    minimum_hours: i64,
    floor: i32,
    features: &'static [&'static str],
}

#[rustfmt::skip]
const ROOMS: &[RoomSeed] = &[
    RoomSeed { id: "R101", en: "Room 101", mm: "အခန်း ၁၀၁", room_type: RoomType::Standard, capacity: 6, hourly_rate: 8000, minimum_hours: 2, floor: 1, features: &["TV", "Karaoke"] },
    RoomSeed { id: "R102", en: "Room 102", mm: "အခန်း ၁၀၂", room_type: RoomType::Standard, capacity: 6, hourly_rate: 8000, minimum_hours: 2, floor: 1, features: &["TV", "Karaoke"] },
    RoomSeed { id: "R103", en: "Room 103", mm: "အခန်း ၁၀၃", room_type: RoomType::Standard, capacity: 8, hourly_rate: 10000, minimum_hours: 2, floor: 1, features: &["TV", "Karaoke"] },
    RoomSeed { id: "R201", en: "VIP 201", mm: "VIP ၂၀၁", room_type: RoomType::Vip, capacity: 12, hourly_rate: 15000, minimum_hours: 3, floor: 2, features: &["Karaoke", "Sofa", "Mini Bar"] },
    RoomSeed { id: "R202", en: "VIP 202", mm: "VIP ၂၀၂", room_type: RoomType::Vip, capacity: 12, hourly_rate: 15000, minimum_hours: 3, floor: 2, features: &["Karaoke", "Sofa", "Mini Bar"] },
    RoomSeed { id: "R301", en: "VVIP Suite", mm: "VVIP ဆွိ", room_type: RoomType::Vvip, capacity: 20, hourly_rate: 30000, minimum_hours: 3, floor: 3, features: &["Karaoke", "Stage", "Private Bathroom", "Mini Bar"] },
];

struct MenuSeed {
    id: &'static str,
    en: &'static str,
    mm: &'static str,
    category: &'static str,
    price: i64,
    image: &'static str,
    popular: bool,
}

#[rustfmt::skip]
const MENU: &[MenuSeed] = &[
    MenuSeed { id: "MENU-beer", en: "Myanmar Beer", mm: "မြန်မာဘီယာ", category: "Drinks", price: 3000, image: "🍺", popular: true },
    MenuSeed { id: "MENU-cola", en: "Coca-Cola", mm: "ကိုကာကိုလာ", category: "Drinks", price: 1500, image: "🥤", popular: false },
    MenuSeed { id: "MENU-water", en: "Drinking Water", mm: "သောက်ရေ", category: "Drinks", price: 500, image: "💧", popular: false },
    MenuSeed { id: "MENU-whisky", en: "Whisky Bottle", mm: "", category: "Drinks", price: 45000, image: "🥃", popular: false },
    MenuSeed { id: "MENU-fries", en: "French Fries", mm: "အာလူးချောင်းကြော်", category: "Snacks", price: 3000, image: "🍟", popular: true },
    MenuSeed { id: "MENU-peanuts", en: "Fried Peanuts", mm: "မြေပဲကြော်", category: "Snacks", price: 2000, image: "🥜", popular: false },
    MenuSeed { id: "MENU-friedrice", en: "Fried Rice", mm: "ထမင်းကြော်", category: "Food", price: 4500, image: "🍚", popular: true },
    MenuSeed { id: "MENU-fruit", en: "Fruit Platter", mm: "သစ်သီးပွဲ", category: "Food", price: 8000, image: "🍉", popular: false },
];

pub fn default_rooms() -> Vec<Room> {
    ROOMS
        .iter()
        .map(|seed| {
            let mut room = Room::new(
                seed.id,
                LocalizedText::new(seed.en, seed.mm),
                seed.room_type,
                seed.capacity,
                Decimal::from(seed.hourly_rate),
                Decimal::from(seed.minimum_hours),
            );
            room.floor = seed.floor;
            room.features = seed.features.iter().map(|f| f.to_string()).collect();
            room
        })
        .collect()
}

pub fn default_menu() -> Vec<MenuItem> {
    MENU.iter()
        .map(|seed| {
            let mut item = MenuItem::new(
                seed.id,
                LocalizedText::new(seed.en, seed.mm),
                seed.category,
                Decimal::from(seed.price),
            );
            item.image = seed.image.to_string();
            item.is_popular = seed.popular;
            item
        })
        .collect()
}
