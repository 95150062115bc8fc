//! The JSON subscriber installs once per process.
//!
//! Kept in its own test binary so no other test has installed a global
//! subscriber first.

use std::rc::Rc;

use sticky_headers::StickyHeaders;
use sticky_headers::headless::{HeadlessAdapter, HeadlessList, RecordingCanvas};

#[test]
fn json_subscriber_installs_once() {
    assert!(sticky_core::logging::init_json_logging());
    assert!(!sticky_core::logging::init_json_logging());

    // Emitting through the installed subscriber must not disturb a frame.
    let adapter = Rc::new(HeadlessAdapter::new(vec![Some(1), Some(1), Some(2)], 10));
    let mut headers = StickyHeaders::new(Rc::clone(&adapter));
    let mut list = HeadlessList::new(100, 200);
    list.lay_out(&mut headers, 20, 0);
    headers.paint_overlay(&mut RecordingCanvas::default(), &list);
    assert_eq!(headers.find_header_at(50, 5), Some(0));
}
