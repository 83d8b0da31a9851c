//! To-do item storage.

use super::item::{ItemId, TodoItem};
use crate::{
	dom::window,
	event::{bind, EventRegistration, STORAGE},
};
use core::{
	cell::{Cell, RefCell},
	fmt,
};
use hashbrown::HashSet;
use std::rc::{Rc, Weak};
use tracing::{debug, instrument, trace, warn};
use web_sys::{Storage, StorageEvent};

pub const DEFAULT_STORAGE_KEY: &str = "twig-dom-todos";

/// The operations the to-do application needs from its data store.
///
/// All methods take `&self`: Implementations are shared between event handlers and use interior mutability.
pub trait TodoRepository {
	/// All items, in insertion order.
	fn items(&self) -> Vec<TodoItem>;

	fn add(&self, text: &str) -> TodoItem;

	fn complete(&self, id: ItemId, completed: bool);

	fn rename(&self, id: ItemId, text: &str);

	fn remove(&self, id: ItemId);

	fn complete_all(&self, completed: bool);

	fn remove_all(&self, ids: &HashSet<ItemId>);

	/// Registers `callback` to run whenever the items change through other means than this instance's methods.
	///
	/// The callback stays registered until the returned [`Subscription`] is dropped.
	fn on_external_modification(&self, callback: Box<dyn FnMut()>) -> Subscription;
}

type Callback = Rc<RefCell<dyn FnMut()>>;

/// A list of change callbacks.
///
/// Clones share the same list.
#[derive(Clone, Default)]
pub struct Observers(Rc<RefCell<ObserverList>>);

#[derive(Default)]
struct ObserverList {
	next_token: u64,
	callbacks: Vec<(u64, Callback)>,
}

impl fmt::Debug for Observers {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Observers").field(&self.len()).finish()
	}
}

impl Observers {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.0.borrow().callbacks.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn subscribe(&self, callback: Box<dyn FnMut()>) -> Subscription {
		let mut list = self.0.borrow_mut();
		let token = list.next_token;
		list.next_token += 1;
		list.callbacks.push((token, Rc::new(RefCell::new(callback))));
		Subscription {
			observers: Rc::downgrade(&self.0),
			token,
		}
	}

	/// Calls each callback once.
	///
	/// Callbacks may (un)subscribe while this runs. Those changes apply from the next call on.
	pub fn notify(&self) {
		let callbacks: Vec<Callback> = self.0.borrow().callbacks.iter().map(|(_, callback)| Rc::clone(callback)).collect();
		trace!("Notifying {} observer(s).", callbacks.len());
		for callback in callbacks {
			match callback.try_borrow_mut() {
				Ok(mut callback) => (&mut *callback)(),
				Err(_) => warn!("Skipped re-entrant change notification."),
			}
		}
	}
}

/// Unsubscribes its callback when dropped.
#[must_use = "The callback is unsubscribed when this is dropped."]
pub struct Subscription {
	observers: Weak<RefCell<ObserverList>>,
	token: u64,
}

impl fmt::Debug for Subscription {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Subscription").field("token", &self.token).finish()
	}
}

impl Drop for Subscription {
	fn drop(&mut self) {
		if let Some(observers) = self.observers.upgrade() {
			let token = self.token;
			observers.borrow_mut().callbacks.retain(|(t, _)| *t != token);
		}
	}
}

/// `localStorage` persistence as a JSON array.
struct LocalStorage {
	storage: Storage,
	key: String,
}

impl LocalStorage {
	fn load(&self) -> Vec<TodoItem> {
		let json = match self.storage.get_item(&self.key) {
			Ok(Some(json)) => json,
			Ok(None) => return Vec::new(),
			Err(error) => {
				warn!("Failed to read {:?} from storage: {:?}", self.key, error);
				return Vec::new();
			}
		};
		match serde_json::from_str(&json) {
			Ok(items) => items,
			Err(error) => {
				warn!("Ignoring malformed to-do items in {:?}: {}", self.key, error);
				Vec::new()
			}
		}
	}

	fn save(&self, items: &[TodoItem]) {
		let json = match serde_json::to_string(items) {
			Ok(json) => json,
			Err(error) => return warn!("Failed to serialize to-do items: {}", error),
		};
		if let Err(error) = self.storage.set_item(&self.key, &json) {
			warn!("Failed to write {:?} to storage: {:?}", self.key, error);
		}
	}
}

struct Inner {
	items: RefCell<Vec<TodoItem>>,
	/// `None` once the counter passed [`ItemId::MAX`]. New ids then fill gaps instead.
	next_id: Cell<Option<ItemId>>,
	local_storage: Option<LocalStorage>,
	observers: Observers,
}

impl Inner {
	fn new(items: Vec<TodoItem>, local_storage: Option<LocalStorage>) -> Self {
		let inner = Self {
			items: RefCell::new(Vec::new()),
			next_id: Cell::new(Some(1)),
			local_storage,
			observers: Observers::new(),
		};
		inner.replace_items(items);
		inner
	}

	fn replace_items(&self, items: Vec<TodoItem>) {
		let next_id = match items.iter().map(|item| item.id).max() {
			None => Some(1),
			Some(max) => max.checked_add(1),
		};
		self.next_id.set(match (self.next_id.get(), next_id) {
			(Some(current), Some(next_id)) => Some(current.max(next_id)),
			(Some(_), None) => {
				warn!("Item ids are exhausted. New items will reuse free ids.");
				None
			}
			(None, _) => None,
		});
		*self.items.borrow_mut() = items;
	}

	fn allocate_id(&self) -> ItemId {
		if let Some(id) = self.next_id.get() {
			self.next_id.set(id.checked_add(1));
			return id;
		}

		let items = self.items.borrow();
		let used: HashSet<ItemId> = items.iter().map(|item| item.id).collect();
		// There are fewer items than ids, so this stops before overflowing.
		let mut id = 1;
		while used.contains(&id) {
			id += 1;
		}
		id
	}

	/// Whether `event` reports a change to this repository's key in its storage area.
	fn is_affected_by(&self, event: &StorageEvent) -> bool {
		self.local_storage.as_ref().map_or(false, |local_storage| {
			event.storage_area().as_ref() == Some(&local_storage.storage)
				// `key` is `null` when the whole storage was cleared.
				&& event.key().map_or(true, |changed| changed == local_storage.key)
		})
	}

	fn reload(&self) {
		if let Some(local_storage) = &self.local_storage {
			self.replace_items(local_storage.load());
			debug!("Reloaded {} item(s) from storage.", self.items.borrow().len());
		}
	}

	/// Applies `f` and persists the result.
	fn modify<T>(&self, f: impl FnOnce(&mut Vec<TodoItem>) -> T) -> T {
		let mut items = self.items.borrow_mut();
		let result = f(&mut items);
		if let Some(local_storage) = &self.local_storage {
			local_storage.save(&items);
		}
		result
	}
}

/// A [`TodoRepository`] kept in memory and optionally mirrored into `localStorage`.
///
/// When backed by `localStorage`, changes made to the same key by other documents
/// (for example another tab) reload the items and notify [external modification](`TodoRepository::on_external_modification`) subscribers.
pub struct TodoItemRepository {
	inner: Rc<Inner>,
	storage_listener: RefCell<Option<EventRegistration>>,
}

impl fmt::Debug for TodoItemRepository {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TodoItemRepository")
			.field("items", &self.inner.items.borrow().len())
			.field("key", &self.inner.local_storage.as_ref().map(|local_storage| &local_storage.key))
			.field("observers", &self.inner.observers)
			.finish()
	}
}

impl Default for TodoItemRepository {
	fn default() -> Self {
		Self::in_memory()
	}
}

impl TodoItemRepository {
	#[must_use]
	pub fn in_memory() -> Self {
		Self::with_items(Vec::new())
	}

	#[must_use]
	pub fn with_items(items: impl IntoIterator<Item = TodoItem>) -> Self {
		Self::from_inner(Inner::new(items.into_iter().collect(), None))
	}

	/// Loads from and saves to `localStorage` under `key`.
	///
	/// Falls back to [in-memory](`TodoItemRepository::in_memory`) operation if `localStorage` is unavailable.
	#[must_use]
	#[instrument]
	pub fn local_storage(key: &str) -> Self {
		match window().local_storage() {
			Ok(Some(storage)) => {
				let local_storage = LocalStorage { storage, key: key.to_owned() };
				let items = local_storage.load();
				debug!("Loaded {} item(s) from storage.", items.len());
				Self::from_inner(Inner::new(items, Some(local_storage)))
			}
			Ok(None) => {
				warn!("`localStorage` is unavailable. Items won't be persisted.");
				Self::in_memory()
			}
			Err(error) => {
				warn!("Failed to access `localStorage`: {:?}. Items won't be persisted.", error);
				Self::in_memory()
			}
		}
	}

	fn from_inner(inner: Inner) -> Self {
		Self {
			inner: Rc::new(inner),
			storage_listener: RefCell::new(None),
		}
	}

	#[must_use]
	pub fn is_persistent(&self) -> bool {
		self.inner.local_storage.is_some()
	}

	/// Reloads from storage (if any) and notifies subscribers, as if the items had been changed elsewhere.
	#[instrument(skip(self))]
	pub fn notify_external_modification(&self) {
		self.inner.reload();
		self.inner.observers.notify();
	}

	fn listen_to_storage(&self) {
		let mut storage_listener = self.storage_listener.borrow_mut();
		if storage_listener.is_some() || self.inner.local_storage.is_none() {
			return;
		}

		let inner = Rc::downgrade(&self.inner);
		*storage_listener = Some(bind(&window(), STORAGE, move |event| {
			if let Some(inner) = inner.upgrade() {
				if inner.is_affected_by(&event) {
					inner.reload();
					inner.observers.notify();
				}
			}
		}));
	}
}

impl TodoRepository for TodoItemRepository {
	fn items(&self) -> Vec<TodoItem> {
		self.inner.items.borrow().clone()
	}

	#[instrument(skip(self, text))]
	fn add(&self, text: &str) -> TodoItem {
		let id = self.inner.allocate_id();
		let item = TodoItem::new(id, text);
		self.inner.modify(|items| items.push(item.clone()));
		if cfg!(feature = "dangerous-logging") {
			debug!(id, text, "Added item.");
		} else {
			debug!(id, "Added item.");
		}
		item
	}

	#[instrument(skip(self))]
	fn complete(&self, id: ItemId, completed: bool) {
		self.inner.modify(|items| {
			if let Some(item) = items.iter_mut().find(|item| item.id == id) {
				item.completed = completed;
			} else {
				warn!("No item to complete.");
			}
		});
	}

	#[instrument(skip(self, text))]
	fn rename(&self, id: ItemId, text: &str) {
		self.inner.modify(|items| {
			if let Some(item) = items.iter_mut().find(|item| item.id == id) {
				item.text = text.to_owned();
			} else {
				warn!("No item to rename.");
			}
		});
	}

	#[instrument(skip(self))]
	fn remove(&self, id: ItemId) {
		self.inner.modify(|items| items.retain(|item| item.id != id));
	}

	#[instrument(skip(self))]
	fn complete_all(&self, completed: bool) {
		self.inner.modify(|items| {
			for item in items.iter_mut() {
				item.completed = completed;
			}
		});
	}

	#[instrument(skip(self, ids), fields(count = ids.len()))]
	fn remove_all(&self, ids: &HashSet<ItemId>) {
		let removed = self.inner.modify(|items| {
			let before = items.len();
			items.retain(|item| !ids.contains(&item.id));
			before - items.len()
		});
		debug!("Removed {} item(s).", removed);
	}

	fn on_external_modification(&self, callback: Box<dyn FnMut()>) -> Subscription {
		self.listen_to_storage();
		self.inner.observers.subscribe(callback)
	}
}
