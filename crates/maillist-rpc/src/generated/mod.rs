// @generated
// This file wires up buf-generated protobuf code
// Note: The prost file already include!()s the tonic file

pub mod mailinglist {
    include!("mailinglist.rs");
    // mailinglist.tonic.rs is auto-included by mailinglist.rs
}
