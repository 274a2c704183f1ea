//! Logging observers attached to store fields.

use std::{cell::RefCell, rc::Rc};
use tracing::info;

use crate::{
    cell::Subscription,
    colors::{colored_field, colored_tag},
    field::Field,
    store::SharedConfigStore,
};

/// Subscribes a logger to `field` that reports every value it sees.
///
/// The first line carries the value at subscription time; each later line is
/// a write. Lines are prefixed with the subscription's colored tag.
pub fn log_changes(store: &SharedConfigStore, field: Field) -> Subscription {
    let tag = Rc::new(RefCell::new(String::new()));
    let label = Rc::clone(&tag);
    let mut first = true;

    let subscription = store.subscribe(field, move |value| {
        let label = label.borrow();
        if std::mem::take(&mut first) {
            // The tag is not known yet while subscribe runs the first call.
            info!("watching {} = {}", colored_field(field), value);
        } else {
            info!("{} {} → {}", colored_tag(&label), colored_field(field), value);
        }
    });

    *tag.borrow_mut() = subscription.tag().to_string();
    info!("{} attached to {}", colored_tag(subscription.tag()), colored_field(field));
    subscription
}
