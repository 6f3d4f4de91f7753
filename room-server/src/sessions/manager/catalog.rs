//! Room and menu maintenance

use super::{ManagerResult, RoomManager};
use crate::store::{keys, put_record};
use shared::models::{MenuItem, Room, RoomStatus};

impl RoomManager {
    /// Insert or replace a room definition.
    ///
    /// Status and live session are owned by the lifecycle: an existing room
    /// keeps its own, a new room starts without a session (and never as
    /// occupied).
    pub fn save_room(&self, mut room: Room) -> ManagerResult<Room> {
        let mut rooms = self.rooms.write();
        match rooms.get(&room.id) {
            Some(existing) => {
                room.status = existing.status;
                room.session = existing.session.clone();
            }
            None => {
                room.session = None;
                if room.status == RoomStatus::Occupied {
                    room.status = RoomStatus::Available;
                }
            }
        }

        rooms.insert(room.id.clone(), room.clone());

        if let Err(e) = put_record(self.store.as_ref(), &keys::room(&room.id), &room) {
            tracing::error!(room_id = %room.id, error = %e, "Failed to persist room");
            return Err(e.into());
        }
        tracing::info!(room_id = %room.id, "Room saved");
        Ok(room)
    }

    /// Delete a room that is not in use
    pub fn delete_room(&self, room_id: &str) -> ManagerResult<Option<Room>> {
        let mut rooms = self.rooms.write();
        match rooms.get(room_id) {
            None => return Ok(None),
            Some(room) if room.is_occupied() => {
                tracing::debug!(room_id = %room_id, "Refusing to delete occupied room");
                return Ok(None);
            }
            Some(_) => {}
        }

        let removed = rooms.remove(room_id);
        if let Err(e) = self.store.remove(&keys::room(room_id)) {
            tracing::error!(room_id = %room_id, error = %e, "Failed to remove room from store");
            return Err(e.into());
        }
        tracing::info!(room_id = %room_id, "Room deleted");
        Ok(removed)
    }

    /// Menu items ordered by English name
    pub fn menu_items(&self) -> Vec<MenuItem> {
        let mut items: Vec<MenuItem> = self.menu.read().values().cloned().collect();
        items.sort_by(|a, b| a.name.en.cmp(&b.name.en));
        items
    }

    pub fn menu_item(&self, item_id: &str) -> Option<MenuItem> {
        self.menu.read().get(item_id).cloned()
    }

    /// Insert or replace a menu item. Lines already ordered keep the name and
    /// price they were ordered at.
    pub fn save_menu_item(&self, item: MenuItem) -> ManagerResult<MenuItem> {
        self.menu.write().insert(item.id.clone(), item.clone());
        if let Err(e) = put_record(self.store.as_ref(), &keys::menu(&item.id), &item) {
            tracing::error!(item_id = %item.id, error = %e, "Failed to persist menu item");
            return Err(e.into());
        }
        Ok(item)
    }

    pub fn delete_menu_item(&self, item_id: &str) -> ManagerResult<Option<MenuItem>> {
        let Some(removed) = self.menu.write().remove(item_id) else {
            return Ok(None);
        };
        if let Err(e) = self.store.remove(&keys::menu(item_id)) {
            tracing::error!(item_id = %item_id, error = %e, "Failed to remove menu item from store");
            return Err(e.into());
        }
        Ok(Some(removed))
    }

    /// Order a menu item by id (see [`RoomManager::add_order`])
    pub fn add_menu_order(
        &self,
        room_id: &str,
        item_id: &str,
        quantity: u32,
        special_request: Option<String>,
    ) -> ManagerResult<Option<Room>> {
        let Some(item) = self.menu_item(item_id) else {
            tracing::debug!(item_id = %item_id, "Menu item not found, ignored");
            return Ok(None);
        };
        self.add_order(room_id, &item, quantity, special_request)
    }

    /// First-boot seeding: writes `rooms` / `menu` only when the respective
    /// table is empty. Returns how many records were written.
    pub fn seed_if_empty(&self, rooms: Vec<Room>, menu: Vec<MenuItem>) -> ManagerResult<usize> {
        let mut written = 0;

        if self.rooms.read().is_empty() {
            for room in rooms {
                self.save_room(room)?;
                written += 1;
            }
        }
        if self.menu.read().is_empty() {
            for item in menu {
                self.save_menu_item(item)?;
                written += 1;
            }
        }

        if written > 0 {
            tracing::info!(records = written, "Seeded default catalog");
        }
        Ok(written)
    }
}
