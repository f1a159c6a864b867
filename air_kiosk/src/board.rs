//! The demo ordering board: three screens of panels and the actions behind them.
//!
//! `KioskBoard` is both the hit-test resolver (through [`KioskBoard::region_map`])
//! and the [`ActivationSink`] that receives selections from the session.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use hand_cursor::{Activation, ActivationSink, Rect, RegionMap};
use tracing::{debug, info, warn};

use crate::error::KioskError;

// ════════════════════════════════════════════════════════════════════════════
// Menu
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MenuItem {
    pub id:   u32,
    pub name: &'static str,
}

pub const MENU: &[MenuItem] = &[
    MenuItem { id: 1, name: "Masala Dosa" },
    MenuItem { id: 2, name: "Idli Vada" },
    MenuItem { id: 3, name: "Paneer Wrap" },
    MenuItem { id: 4, name: "Veg Biryani" },
    MenuItem { id: 5, name: "Mango Lassi" },
    MenuItem { id: 6, name: "Filter Coffee" },
];

fn menu_item(id: u32) -> Option<&'static MenuItem> {
    MENU.iter().find(|m| m.id == id)
}

// ════════════════════════════════════════════════════════════════════════════
// Screen / Action
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen { Home, Menu, Cart }

/// Everything a panel can do when selected.  The string form is the target key
/// handed to the hit-tester, e.g. `add-item:3`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    StartOrdering,
    GoHome,
    GoCart,
    AddItem(u32),
    IncreaseQty(u32),
    DecreaseQty(u32),
    Checkout,
    NewOrder,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::StartOrdering  => f.write_str("start-ordering"),
            Action::GoHome         => f.write_str("go-home"),
            Action::GoCart         => f.write_str("go-cart"),
            Action::AddItem(n)     => write!(f, "add-item:{n}"),
            Action::IncreaseQty(n) => write!(f, "increase-qty:{n}"),
            Action::DecreaseQty(n) => write!(f, "decrease-qty:{n}"),
            Action::Checkout       => f.write_str("checkout"),
            Action::NewOrder       => f.write_str("new-order"),
        }
    }
}

impl FromStr for Action {
    type Err = KioskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || KioskError::UnknownAction(s.to_string());
        let (name, arg) = match s.split_once(':') {
            Some((name, arg)) => (name, Some(arg.parse::<u32>().map_err(|_| unknown())?)),
            None              => (s, None),
        };
        match (name, arg) {
            ("start-ordering", None)    => Ok(Action::StartOrdering),
            ("go-home",        None)    => Ok(Action::GoHome),
            ("go-cart",        None)    => Ok(Action::GoCart),
            ("checkout",       None)    => Ok(Action::Checkout),
            ("new-order",      None)    => Ok(Action::NewOrder),
            ("add-item",       Some(n)) => Ok(Action::AddItem(n)),
            ("increase-qty",   Some(n)) => Ok(Action::IncreaseQty(n)),
            ("decrease-qty",   Some(n)) => Ok(Action::DecreaseQty(n)),
            _ => Err(unknown()),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Panel
// ════════════════════════════════════════════════════════════════════════════

/// One drawn rectangle.  Panels without an action are decoration: they still
/// take part in hit-testing and hide whatever lies under them.
#[derive(Clone, Debug, PartialEq)]
pub struct Panel {
    pub bounds: Rect,
    pub label:  String,
    pub action: Option<Action>,
}

impl Panel {
    fn button(bounds: Rect, label: impl Into<String>, action: Action) -> Self {
        Panel { bounds, label: label.into(), action: Some(action) }
    }

    fn decoration(bounds: Rect, label: impl Into<String>) -> Self {
        Panel { bounds, label: label.into(), action: None }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// KioskBoard
// ════════════════════════════════════════════════════════════════════════════

pub struct KioskBoard {
    screen:        Screen,
    quantities:    BTreeMap<u32, u32>,
    width:         f32,
    height:        f32,
    orders_placed: u32,
    last_action:   Option<String>,
}

impl KioskBoard {
    pub fn new(width: f32, height: f32) -> Self {
        KioskBoard {
            screen:        Screen::Home,
            quantities:    BTreeMap::new(),
            width,
            height,
            orders_placed: 0,
            last_action:   None,
        }
    }

    pub fn screen(&self) -> Screen { self.screen }
    pub fn orders_placed(&self) -> u32 { self.orders_placed }
    pub fn last_action(&self) -> Option<&str> { self.last_action.as_deref() }

    pub fn quantity(&self, item: u32) -> u32 {
        self.quantities.get(&item).copied().unwrap_or(0)
    }

    pub fn item_count(&self) -> u32 {
        self.quantities.values().sum()
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::StartOrdering => self.screen = Screen::Menu,
            Action::GoHome        => self.screen = Screen::Home,
            Action::GoCart        => self.screen = Screen::Cart,
            Action::AddItem(id) | Action::IncreaseQty(id) => {
                if menu_item(id).is_none() {
                    warn!(item = id, "no such menu item");
                    return;
                }
                *self.quantities.entry(id).or_insert(0) += 1;
            }
            Action::DecreaseQty(id) => {
                if let Some(q) = self.quantities.get_mut(&id) {
                    *q -= 1;
                    if *q == 0 {
                        self.quantities.remove(&id);
                    }
                }
            }
            Action::Checkout => {
                if self.quantities.is_empty() { return; }
                self.orders_placed += 1;
                info!(order = self.orders_placed, items = self.item_count(), "order placed");
                self.quantities.clear();
                self.screen = Screen::Home;
            }
            Action::NewOrder => {
                self.quantities.clear();
                self.screen = Screen::Menu;
            }
        }
    }

    /// Panels of the current screen in paint order, bottom first.
    pub fn panels(&self) -> Vec<Panel> {
        let (w, h) = (self.width, self.height);
        let m = w * 0.04;
        let mut panels = vec![Panel::decoration(Rect::new(0.0, 0.0, w, h * 0.14), self.title())];

        match self.screen {
            Screen::Home => {
                panels.push(Panel::button(
                    Rect::new(w * 0.3, h * 0.38, w * 0.4, h * 0.2),
                    "START ORDER",
                    Action::StartOrdering,
                ));
                panels.push(Panel::decoration(
                    Rect::new(w * 0.2, h * 0.72, w * 0.6, h * 0.08),
                    format!("HOVER OR PINCH TO SELECT   ORDERS: {}", self.orders_placed),
                ));
            }
            Screen::Menu => {
                let card_w = (w - 4.0 * m) / 3.0;
                let card_h = (h * 0.6 - m) / 2.0;
                for (i, item) in MENU.iter().enumerate() {
                    let (col, row) = ((i % 3) as f32, (i / 3) as f32);
                    let bounds = Rect::new(
                        m + col * (card_w + m),
                        h * 0.2 + row * (card_h + m),
                        card_w,
                        card_h,
                    );
                    let label = match self.quantity(item.id) {
                        0 => item.name.to_string(),
                        q => format!("{}  X{}", item.name, q),
                    };
                    panels.push(Panel::button(bounds, label, Action::AddItem(item.id)));
                }
                self.push_footer(&mut panels, ("HOME", Action::GoHome),
                                 (format!("CART ({})", self.item_count()), Action::GoCart));
            }
            Screen::Cart => {
                let row_h = h * 0.1;
                for (i, (&id, &qty)) in self.quantities.iter().enumerate() {
                    let y = h * 0.18 + i as f32 * row_h;
                    let name = menu_item(id).map(|m| m.name).unwrap_or("?");
                    panels.push(Panel::decoration(
                        Rect::new(m, y, w * 0.5, row_h * 0.8),
                        format!("{name}  X{qty}"),
                    ));
                    panels.push(Panel::button(
                        Rect::new(m + w * 0.55, y, w * 0.1, row_h * 0.8), "-", Action::DecreaseQty(id)));
                    panels.push(Panel::button(
                        Rect::new(m + w * 0.68, y, w * 0.1, row_h * 0.8), "+", Action::IncreaseQty(id)));
                }
                if self.quantities.is_empty() {
                    panels.push(Panel::decoration(
                        Rect::new(m, h * 0.18, w - 2.0 * m, row_h), "CART IS EMPTY"));
                    self.push_footer(&mut panels, ("MENU", Action::StartOrdering),
                                     ("NEW ORDER".to_string(), Action::NewOrder));
                } else {
                    self.push_footer(&mut panels, ("MENU", Action::StartOrdering),
                                     ("CHECKOUT".to_string(), Action::Checkout));
                }
            }
        }
        panels
    }

    /// Hit-test surface for the current screen.
    pub fn region_map(&self) -> RegionMap {
        let mut map = RegionMap::new();
        for panel in self.panels() {
            match panel.action {
                Some(action) => map.push_interactive(panel.bounds, action.to_string()),
                None         => map.push_decoration(panel.bounds),
            };
        }
        map
    }

    fn title(&self) -> &'static str {
        match self.screen {
            Screen::Home => "AIR MENU",
            Screen::Menu => "MENU",
            Screen::Cart => "YOUR CART",
        }
    }

    fn push_footer(&self, panels: &mut Vec<Panel>, left: (&str, Action), right: (String, Action)) {
        let (w, h) = (self.width, self.height);
        let m = w * 0.04;
        let bw = w * 0.25;
        panels.push(Panel::button(Rect::new(m, h * 0.85, bw, h * 0.1), left.0, left.1));
        panels.push(Panel::button(Rect::new(w - m - bw, h * 0.85, bw, h * 0.1), right.0, right.1));
    }
}

impl ActivationSink for KioskBoard {
    fn activate(&mut self, activation: &Activation) {
        let key = activation.target.as_str();
        match key.parse::<Action>() {
            Ok(action) => {
                debug!(%action, kind = activation.kind.as_str(), "board action");
                self.apply(action);
                self.last_action = Some(key.to_string());
            }
            Err(e) => warn!(error = %e, "activation ignored"),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
