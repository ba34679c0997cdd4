use quire_cn::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

#[test]
fn message_lifecycle() {
    let closed = Rc::new(RefCell::new(Vec::new()));
    let mut provider = cn::message_provider(MessageProviderProps::default());

    let c = closed.clone();
    let short = provider.info(
        "short",
        MessageOptions::new()
            .duration(Duration::from_millis(500))
            .on_close(move || c.borrow_mut().push("short")),
    );
    let c = closed.clone();
    let sticky = provider.loading(
        "sticky",
        MessageOptions::new()
            .duration(Duration::ZERO)
            .closable(true)
            .on_close(move || c.borrow_mut().push("sticky")),
    );
    let normal = provider.warning("normal", MessageOptions::new());
    assert_eq!(provider.len(), 3);

    assert_eq!(provider.advance(Duration::from_millis(500)), vec![short]);
    // Still listed while the leave transition runs
    assert_eq!(provider.len(), 3);
    provider.after_leave(short);
    assert_eq!(&*closed.borrow(), &["short"]);

    assert_eq!(provider.advance(Duration::from_secs(10)), vec![normal]);
    provider.after_leave(normal);

    let listed: Vec<_> = provider.messages().map(|(h, _)| h).collect();
    assert_eq!(listed, vec![sticky]);

    assert!(provider.destroy(sticky));
    provider.after_leave(sticky);
    assert_eq!(&*closed.borrow(), &["short", "sticky"]);
    assert!(provider.is_empty());

    // Stale handles are ignored
    assert!(!provider.destroy(sticky));
    assert!(!provider.set_content(sticky, "gone"));
}
