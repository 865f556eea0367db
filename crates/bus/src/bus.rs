// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `on(iface, selectors, operation, handler)` registration and the
//! capability-chain dispatch algorithm (§4.4).

use std::collections::HashMap;
use std::sync::Arc;

use smol_str::SmolStr;
use tracing::warn;
use wfe_core::{ActivityEvent, Dispatch, NoticeKind, NoticePublisher, OperationId, ResourceRef};

use crate::handler::Handler;
use crate::selector::Selector;

struct Subscription {
    selector: Selector,
    handler: Arc<dyn Handler>,
}

/// Per-interface, registration-ordered handler lists. Registration order
/// is preserved exactly as registered — a wildcard selector only runs
/// before a concrete one if it was registered first (§4.4).
#[derive(Default)]
pub struct SubscriptionBus {
    by_iface: HashMap<String, Vec<Subscription>>,
}

impl SubscriptionBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&mut self, iface: &str, selector: impl Into<Selector>, handler: Arc<dyn Handler>) {
        self.by_iface.entry(iface.to_string()).or_default().push(Subscription { selector: selector.into(), handler });
    }
}

#[async_trait::async_trait]
impl NoticePublisher for SubscriptionBus {
    async fn publish(
        &self,
        ctx: &ResourceRef,
        capability_chain: &[SmolStr],
        kind: NoticeKind,
        event: &ActivityEvent,
        operation: Option<OperationId>,
    ) -> Vec<Dispatch> {
        let mut dispatches = Vec::new();
        for iface in capability_chain {
            let Some(subs) = self.by_iface.get(iface.as_str()) else { continue };
            for sub in subs {
                if !sub.selector.matches(&kind) {
                    continue;
                }
                match sub.handler.handle(ctx, event, operation.clone()) {
                    Ok(grouped) => {
                        for (_operation, group) in grouped {
                            dispatches.extend(group);
                        }
                    }
                    Err(err) => {
                        warn!(handler = sub.handler.name(), ctx = %ctx, error = %err, "subscription handler failed");
                    }
                }
            }
        }
        dispatches
    }
}
