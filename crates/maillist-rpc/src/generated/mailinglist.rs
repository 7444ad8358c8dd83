// @generated
// This file is @generated by prost-build.
/// One subscriber. confirmed_at is seconds since the Unix epoch.
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct EmailEntry {
    #[prost(int64, tag = "1")]
    pub id: i64,
    #[prost(string, tag = "2")]
    pub email: ::prost::alloc::string::String,
    #[prost(int64, tag = "3")]
    pub confirmed_at: i64,
    #[prost(bool, tag = "4")]
    pub opt_out: bool,
}
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct CreateEmailRequest {
    #[prost(string, tag = "1")]
    pub email_addr: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct GetEmailRequest {
    #[prost(string, tag = "1")]
    pub email_addr: ::prost::alloc::string::String,
}
#[derive(Clone, Copy, PartialEq, Eq, Hash, ::prost::Message)]
pub struct GetEmailBatchRequest {
    #[prost(int32, tag = "1")]
    pub count: i32,
    #[prost(int32, tag = "2")]
    pub page: i32,
}
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct UpdateEmailRequest {
    #[prost(message, optional, tag = "1")]
    pub email_entry: ::core::option::Option<EmailEntry>,
}
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct DeleteEmailRequest {
    #[prost(string, tag = "1")]
    pub email_addr: ::prost::alloc::string::String,
}
/// email_entry is unset when the address is not registered.
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct EmailResponse {
    #[prost(message, optional, tag = "1")]
    pub email_entry: ::core::option::Option<EmailEntry>,
}
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct GetEmailBatchResponse {
    #[prost(message, repeated, tag = "1")]
    pub email_entries: ::prost::alloc::vec::Vec<EmailEntry>,
}
include!("mailinglist.tonic.rs");
// @@protoc_insertion_point(module)
