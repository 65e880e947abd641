use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize, Serializer};
use tracing::{debug, trace};

use crate::de::null_as_default;
use crate::error::{EnvelopeError, Result};
use crate::fields::{join_fields, split_fields};
use crate::item::Item;

/// The `data` section of an envelope.
///
/// Holds descriptive metadata about the returned entities together with the
/// entities themselves as opaque [`Item`]s. Pagination counters and links are
/// stored exactly as the caller sets them; only `currentItemCount` and the
/// field-list text are derived here.
///
/// On decode `currentItemCount` is kept as a snapshot of what the peer sent.
/// On encode it is always the number of stored items.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DataPayload {
    /// Name of the entity type being returned, such as `cars` or `orders`.
    pub kind: String,

    #[serde(rename = "fields")]
    field_list: String,

    /// Version tag of the returned data.
    pub etag: String,
    pub id: String,
    pub lang: String,

    /// Last update time, formatted by the caller.
    pub updated: String,

    /// Whether a delete request took effect. Always present on the wire.
    pub deleted: bool,

    current_item_count: usize,

    pub items_per_page: i64,
    pub start_index: i64,
    pub total_items: i64,
    pub page_index: i64,
    pub total_pages: i64,

    pub self_link: String,
    pub edit_link: String,
    pub next_link: String,
    pub previous_link: String,

    #[serde(deserialize_with = "null_as_default")]
    items: Vec<Item>,

    #[serde(skip)]
    position: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DataWire<'a> {
    #[serde(skip_serializing_if = "str::is_empty")]
    kind: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    fields: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    etag: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    id: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    lang: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    updated: &'a str,
    deleted: bool,
    #[serde(skip_serializing_if = "is_zero_count")]
    current_item_count: usize,
    #[serde(skip_serializing_if = "is_zero")]
    items_per_page: i64,
    #[serde(skip_serializing_if = "is_zero")]
    start_index: i64,
    #[serde(skip_serializing_if = "is_zero")]
    total_items: i64,
    #[serde(skip_serializing_if = "is_zero")]
    page_index: i64,
    #[serde(skip_serializing_if = "is_zero")]
    total_pages: i64,
    #[serde(skip_serializing_if = "str::is_empty")]
    self_link: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    edit_link: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    next_link: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    previous_link: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    items: &'a Vec<Item>,
}

fn is_zero(value: &i64) -> bool {
    *value == 0
}

fn is_zero_count(value: &usize) -> bool {
    *value == 0
}

impl Serialize for DataPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        DataWire {
            kind: &self.kind,
            fields: &self.field_list,
            etag: &self.etag,
            id: &self.id,
            lang: &self.lang,
            updated: &self.updated,
            deleted: self.deleted,
            current_item_count: self.items.len(),
            items_per_page: self.items_per_page,
            start_index: self.start_index,
            total_items: self.total_items,
            page_index: self.page_index,
            total_pages: self.total_pages,
            self_link: &self.self_link,
            edit_link: &self.edit_link,
            next_link: &self.next_link,
            previous_link: &self.previous_link,
            items: &self.items,
        }
        .serialize(serializer)
    }
}

impl DataPayload {
    /// Create an empty payload with the cursor at position 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one or more names to the field list.
    ///
    /// Passing no names still re-normalizes the stored text.
    pub fn add_fields<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut fields = self.fields();
        fields.extend(names.into_iter().map(|name| name.as_ref().to_owned()));
        self.field_list = join_fields(&fields);
    }

    /// Decode the field list. Empty text yields an empty list.
    pub fn fields(&self) -> Vec<String> {
        split_fields(&self.field_list)
    }

    /// The encoded, comma-joined field list.
    pub fn fields_text(&self) -> &str {
        &self.field_list
    }

    /// Encode `record` and append it to the item list.
    ///
    /// On failure nothing is appended and the derived count is unchanged.
    pub fn add_item<T: Serialize + ?Sized>(&mut self, record: &T) -> Result<()> {
        let item = Item::encode(record)?;
        self.push_item(item);
        Ok(())
    }

    /// Append already-encoded JSON as an item.
    pub fn add_raw_item(&mut self, json: impl Into<String>) -> Result<()> {
        let item = Item::from_json(json)?;
        self.push_item(item);
        Ok(())
    }

    fn push_item(&mut self, item: Item) {
        debug!(
            index = self.items.len(),
            size = item.len(),
            kind = %self.kind,
            "appending data item"
        );
        self.items.push(item);
        self.set_item_count();
    }

    /// Number of stored items.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Re-derive `currentItemCount` from the stored items.
    pub fn set_item_count(&mut self) {
        self.current_item_count = self.items.len();
    }

    /// The `currentItemCount` snapshot, as last derived or as decoded.
    pub fn current_item_count(&self) -> usize {
        self.current_item_count
    }

    /// Stored items in insertion order.
    pub fn raw_items(&self) -> &[Item] {
        &self.items
    }

    /// Decode every item into `T`, in order, without moving the cursor.
    pub fn decode_items<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        self.items.iter().map(Item::decode).collect()
    }

    /// Move the cursor back to the first item.
    pub fn reset_items(&mut self) {
        trace!(from = self.position, "resetting item cursor");
        self.position = 0;
    }

    /// Current cursor position.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Decode the item under the cursor.
    ///
    /// Fails with [`EnvelopeError::NoSuchItem`] when no items are stored or the
    /// cursor is out of bounds.
    pub fn current_item<T: DeserializeOwned>(&self) -> Result<T> {
        self.item_at(self.position)
    }

    /// Advance the cursor and decode the item it lands on.
    ///
    /// Fails with [`EnvelopeError::EndOfItems`] when the cursor already sits on
    /// the last item. The cursor only moves when the read succeeds.
    pub fn next_item<T: DeserializeOwned>(&mut self) -> Result<T> {
        let next = self.position + 1;
        if next >= self.items.len() {
            trace!(position = self.position, "item cursor exhausted");
            return Err(EnvelopeError::EndOfItems);
        }
        let value = self.item_at(next)?;
        trace!(from = self.position, to = next, "advanced item cursor");
        self.position = next;
        Ok(value)
    }

    fn item_at<T: DeserializeOwned>(&self, position: usize) -> Result<T> {
        let item = self
            .items
            .get(position)
            .ok_or(EnvelopeError::NoSuchItem {
                position,
                count: self.items.len(),
            })?;
        item.decode()
    }

    /// True when nothing but defaults is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
