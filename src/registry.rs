// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Murex-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Murex and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Item handler registry.
//!
//! Open-ended plugin registration for items shown outside the diagram (tree
//! entries, tabs). Handlers are kept in registration order with the newest
//! first, queried via first match, with a catch-all default when nothing
//! claims an item. The registry is an explicit object passed by reference,
//! not module state.

/// An item presented by the surrounding UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: String,
    pub kind: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDescription {
    pub title: String,
    pub label: String,
}

/// A context-menu entry contributed by a handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub id: String,
    pub label: String,
}

pub trait ItemHandler {
    fn handles(&self, item: &Item) -> bool;

    fn describe(&self, item: &Item) -> ItemDescription;

    fn menu_entries(&self, item: &Item, read_only: bool) -> Vec<MenuEntry>;
}

/// Catch-all, used when no registered handler claims an item.
struct DefaultItemHandler;

impl ItemHandler for DefaultItemHandler {
    fn handles(&self, _item: &Item) -> bool {
        true
    }

    fn describe(&self, item: &Item) -> ItemDescription {
        ItemDescription {
            title: "Unknown".to_owned(),
            label: item.label.clone(),
        }
    }

    fn menu_entries(&self, _item: &Item, _read_only: bool) -> Vec<MenuEntry> {
        Vec::new()
    }
}

static DEFAULT_ITEM_HANDLER: DefaultItemHandler = DefaultItemHandler;

#[derive(Default)]
pub struct ItemHandlerRegistry {
    handlers: Vec<Box<dyn ItemHandler>>,
}

impl ItemHandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later registrations take precedence over earlier ones.
    pub fn register(&mut self, handler: Box<dyn ItemHandler>) {
        self.handlers.insert(0, handler);
    }

    pub fn handler_for(&self, item: &Item) -> &dyn ItemHandler {
        self.handlers
            .iter()
            .find(|handler| handler.handles(item))
            .map(Box::as_ref)
            .unwrap_or(&DEFAULT_ITEM_HANDLER)
    }
}
