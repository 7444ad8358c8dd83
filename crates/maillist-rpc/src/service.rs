// ABOUTME: MailingListService implementation backed by the shared EmailStore.
// ABOUTME: Each handler decodes, calls one store operation, and answers with the entry as stored.

use maillist_core::{BatchQuery, EmailEntry};
use maillist_store::EmailStore;
use tonic::{Request, Response, Status};
use tracing::info;

use crate::conversions::{email_response, store_status, validation_status};
use crate::pb::mailing_list_service_server::{MailingListService, MailingListServiceServer};
use crate::pb::{
    CreateEmailRequest, DeleteEmailRequest, EmailResponse, GetEmailBatchRequest,
    GetEmailBatchResponse, GetEmailRequest, UpdateEmailRequest,
};

/// gRPC handler set. Holds a clone of the store handle it was given;
/// it has no other state.
#[derive(Clone)]
pub struct MailServer {
    store: EmailStore,
}

impl MailServer {
    pub fn new(store: EmailStore) -> Self {
        Self { store }
    }

    /// Wrap this handler set in the generated tonic service.
    pub fn into_service(self) -> MailingListServiceServer<Self> {
        MailingListServiceServer::new(self)
    }

    /// Read the entry back after a write, or answer a lookup.
    async fn entry_response(&self, email: &str) -> Result<Response<EmailResponse>, Status> {
        let entry = self.store.get_email(email).await.map_err(store_status)?;
        Ok(Response::new(email_response(entry)))
    }
}

#[tonic::async_trait]
impl MailingListService for MailServer {
    async fn create_email(
        &self,
        request: Request<CreateEmailRequest>,
    ) -> Result<Response<EmailResponse>, Status> {
        let req = request.into_inner();
        info!(email = %req.email_addr, "gRPC CreateEmail");

        self.store
            .create_email(&req.email_addr)
            .await
            .map_err(store_status)?;
        self.entry_response(&req.email_addr).await
    }

    async fn get_email(
        &self,
        request: Request<GetEmailRequest>,
    ) -> Result<Response<EmailResponse>, Status> {
        let req = request.into_inner();
        info!(email = %req.email_addr, "gRPC GetEmail");

        self.entry_response(&req.email_addr).await
    }

    async fn get_email_batch(
        &self,
        request: Request<GetEmailBatchRequest>,
    ) -> Result<Response<GetEmailBatchResponse>, Status> {
        let req = request.into_inner();
        info!(page = req.page, count = req.count, "gRPC GetEmailBatch");

        let query = BatchQuery::new(req.page.into(), req.count.into()).map_err(validation_status)?;
        let entries = self
            .store
            .get_email_batch(query)
            .await
            .map_err(store_status)?;

        Ok(Response::new(GetEmailBatchResponse {
            email_entries: entries.into_iter().map(Into::into).collect(),
        }))
    }

    async fn update_email(
        &self,
        request: Request<UpdateEmailRequest>,
    ) -> Result<Response<EmailResponse>, Status> {
        let wire = request
            .into_inner()
            .email_entry
            .ok_or_else(|| Status::invalid_argument("email_entry is required"))?;
        info!(email = %wire.email, confirmed_at = wire.confirmed_at, opt_out = wire.opt_out, "gRPC UpdateEmail");

        let entry = EmailEntry::try_from(wire).map_err(validation_status)?;
        self.store
            .update_email(&entry)
            .await
            .map_err(store_status)?;
        self.entry_response(&entry.email).await
    }

    async fn delete_email(
        &self,
        request: Request<DeleteEmailRequest>,
    ) -> Result<Response<EmailResponse>, Status> {
        let req = request.into_inner();
        info!(email = %req.email_addr, "gRPC DeleteEmail");

        self.store
            .delete_email(&req.email_addr)
            .await
            .map_err(store_status)?;
        self.entry_response(&req.email_addr).await
    }
}
