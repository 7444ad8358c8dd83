// ABOUTME: gRPC front end for maillist, exposing the five subscriber operations as unary RPCs.
// ABOUTME: Re-exports the generated protobuf types alongside the service and server entry point.

pub mod conversions;
pub mod generated;
pub mod server;
pub mod service;

pub use generated::mailinglist as pb;
pub use generated::mailinglist::mailing_list_service_client::MailingListServiceClient;
pub use generated::mailinglist::mailing_list_service_server::{
    MailingListService, MailingListServiceServer,
};
pub use server::serve;
pub use service::MailServer;
