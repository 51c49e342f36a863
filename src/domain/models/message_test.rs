use super::Message;
use super::Role;

#[test]
fn it_executes_new() {
    let msg = Message::new(Role::User, "Hi there!");
    assert_eq!(msg.role, Role::User);
    assert_eq!(msg.content, "Hi there!".to_string());
    assert!(!msg.is_streaming);
}

#[test]
fn it_executes_new_replacing_tabs() {
    let msg = Message::new(Role::Assistant, "\t\tHi there!");
    assert_eq!(msg.content, "    Hi there!".to_string());
}

#[test]
fn it_executes_new_streaming() {
    let msg = Message::new_streaming(Role::Assistant);
    assert_eq!(msg.role, Role::Assistant);
    assert_eq!(msg.content, "".to_string());
    assert!(msg.is_streaming);
}

#[test]
fn it_executes_append() {
    let mut msg = Message::new_streaming(Role::Assistant);
    msg.append("Hello ");
    msg.append("World");
    assert_eq!(msg.content, "Hello World");
}

#[test]
fn it_executes_append_with_tabs() {
    let mut msg = Message::new(Role::Assistant, "Hi there!");
    msg.append("\tIt's me!");
    assert_eq!(msg.content, "Hi there!  It's me!");
}

#[test]
fn it_executes_finalize() {
    let mut msg = Message::new_streaming(Role::Assistant);
    msg.append("done");
    msg.finalize();
    assert!(!msg.is_streaming);
    assert_eq!(msg.content, "done");
}

#[test]
fn it_maps_roles_to_wire_strings() {
    assert_eq!(Role::User.as_str(), "user");
    assert_eq!(Role::Assistant.as_str(), "assistant");
    assert_eq!(Role::App.as_str(), "app");
}
