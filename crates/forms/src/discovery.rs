use crate::context::{BindingContext, MaskOptions};
use bus::DomEvent;
use core_types::SubscriptionId;
use decimal::DecimalConfig;
use dom::{Document, Id, Node};
use input_core::InputStore;
use std::sync::mpsc::{Receiver, TryRecvError};

const MASK_ATTR: &str = "data-mask";
const UNMASK_ATTR: &str = "data-unmask";
const DECIMAL_ATTR: &str = "data-decimal";
const DEFAULT_PLACES: u32 = 2;

fn wants_binding(node: &Node) -> bool {
    node.is_element("input") && (node.has_attr(MASK_ATTR) || node.has_attr(DECIMAL_ATTR))
}

/// Decimal options declared on an element. Unset attributes keep the
/// [`DecimalConfig`] defaults.
///
/// `data-decimal-places="0"` means zero places. The old script read it with
/// `parseInt(..) || 2` and so turned `0` into 2; only missing or non-numeric
/// values fall back to 2 here. Values above [`decimal::MAX_DECIMAL_PLACES`]
/// are clamped.
pub fn decimal_config_from_attrs(node: &Node) -> DecimalConfig {
    let places = node
        .attr("data-decimal-places")
        .and_then(leading_integer)
        .unwrap_or(DEFAULT_PLACES);

    DecimalConfig::default()
        .with_places(places)
        .with_thousands(node.attr("data-show-thousands") != Some("false"))
        .with_negative(node.attr("data-allow-negative") == Some("true"))
        .with_prefix(node.attr("data-decimal-prefix").unwrap_or(""))
        .with_suffix(node.attr("data-decimal-suffix").unwrap_or(""))
}

// "3px" reads as 3; no leading digit means unset.
fn leading_integer(s: &str) -> Option<u32> {
    let s = s.trim_start();
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s[..end].parse().ok()
}

enum Declared {
    Mask { spec: String, unmask: bool },
    Decimal(DecimalConfig),
}

fn declared(node: &Node) -> Option<Declared> {
    if node.has_attr(DECIMAL_ATTR) {
        if node.has_attr(MASK_ATTR) {
            log::warn!(
                target: "forms",
                "{:?} declares both data-mask and data-decimal, binding decimal",
                node.id()
            );
        }
        return Some(Declared::Decimal(decimal_config_from_attrs(node)));
    }

    let spec = node.attr(MASK_ATTR).map(str::trim).unwrap_or("");
    if spec.is_empty() {
        log::warn!(target: "forms", "{:?} has an empty data-mask", node.id());
        return None;
    }
    Some(Declared::Mask {
        spec: spec.to_string(),
        unmask: node.attr(UNMASK_ATTR) == Some("true"),
    })
}

impl BindingContext {
    /// Bind `root` and every `input` under it that declares `data-mask` or
    /// `data-decimal`. Elements already bound are left alone. Returns how many
    /// bindings were made.
    pub fn discover<S: InputStore>(&mut self, doc: &mut Document, store: &mut S, root: Id) -> usize {
        let candidates: Vec<(Id, Declared)> = doc
            .descendants(root, wants_binding)
            .into_iter()
            .filter(|id| !self.is_bound(*id))
            .filter_map(|id| Some((id, declared(doc.get(id)?)?)))
            .collect();

        let mut bound = 0;
        for (id, decl) in candidates {
            let res = match decl {
                Declared::Mask { spec, unmask } => {
                    self.bind_mask(doc, store, id, &spec, MaskOptions { unmask })
                }
                Declared::Decimal(config) => self.bind_decimal(doc, store, id, config),
            };
            if res.is_ok() {
                bound += 1;
            }
        }

        log::debug!(target: "forms", "discovered {bound} field(s) under {root:?}");
        bound
    }

    /// Run [`discover`](Self::discover) on `root` and keep watching it for
    /// inserted elements. Nothing happens until the subscription is pumped.
    pub fn attach_subtree<S: InputStore>(
        &mut self,
        doc: &mut Document,
        store: &mut S,
        root: Id,
    ) -> DiscoverySubscription {
        let (sub, events) = doc.observe();
        self.discover(doc, store, root);
        DiscoverySubscription {
            root,
            sub: Some(sub),
            events,
        }
    }
}

/// Insertion watch over one subtree.
///
/// Dropping it stops delivery too; the document prunes the dead channel on its
/// next mutation.
#[derive(Debug)]
pub struct DiscoverySubscription {
    root: Id,
    sub: Option<SubscriptionId>,
    events: Receiver<DomEvent>,
}

impl DiscoverySubscription {
    pub fn root(&self) -> Id {
        self.root
    }

    pub fn is_active(&self) -> bool {
        self.sub.is_some()
    }

    /// Handle everything the document reported since the last pump: bind
    /// inserted matches under the root and release bindings whose element
    /// was removed. Returns the number of new bindings.
    pub fn pump<S: InputStore>(
        &mut self,
        ctx: &mut BindingContext,
        doc: &mut Document,
        store: &mut S,
    ) -> usize {
        if self.sub.is_none() {
            return 0;
        }

        let mut bound = 0;
        let mut removed = false;
        loop {
            match self.events.try_recv() {
                Ok(DomEvent::Inserted { node, .. }) => {
                    let node = Id(node);
                    if doc.is_inclusive_descendant(self.root, node) {
                        bound += ctx.discover(doc, store, node);
                    }
                }
                Ok(DomEvent::Removed { .. }) => removed = true,
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.sub = None;
                    break;
                }
            }
        }

        if removed {
            ctx.release_detached(doc, store);
        }
        bound
    }

    pub fn cancel(&mut self, doc: &mut Document) {
        if let Some(sub) = self.sub.take() {
            doc.unobserve(sub);
            log::debug!(target: "forms", "stopped watching {:?}", self.root);
        }
    }
}
