//! Per-kind accessors that build, execute and parse in one call.

use crate::client::HitobitoClient;
use crate::config::ClientConfig;
use crate::error::{ApiError, ConfigError};
use crate::query::ListOptions;
use crate::schema::{
    Creatable, Event, EventKind, EventKindCategory, EventUpdate, Group, GroupUpdate, Invoice,
    InvoiceUpdate, MailingList, MailingListUpdate, Mutable, NewRole, Person, PersonUpdate, Resource,
    Role, RoleUpdate,
};
use crate::transport::{Transport, UreqTransport};

/// A [`HitobitoClient`] bound to a [`Transport`].
///
/// Each accessor is one independent request/validate/decode cycle; nothing
/// is cached or retried.
pub struct Hitobito<T = UreqTransport> {
    client: HitobitoClient,
    transport: T,
}

impl Hitobito<UreqTransport> {
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_transport(HitobitoClient::from_config(config), UreqTransport::new())
    }

    /// Builds a client from `HITOBITO_BASE_URL` and `HITOBITO_TOKEN`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(&ClientConfig::from_env()?))
    }
}

impl<T: Transport> Hitobito<T> {
    pub fn with_transport(client: HitobitoClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &HitobitoClient {
        &self.client
    }

    fn fetch<R: Resource>(&self, id: u64) -> Result<R, ApiError> {
        let request = self.client.build_get::<R>(id);
        self.client.parse_single(self.transport.execute(request)?)
    }

    fn fetch_all<R: Resource>(&self, options: &ListOptions) -> Result<Vec<R>, ApiError> {
        let request = self.client.build_list::<R>(options);
        self.client.parse_list(self.transport.execute(request)?)
    }

    fn update<R: Mutable>(&self, id: u64, update: &R::Update) -> Result<R, ApiError> {
        let request = self.client.build_update::<R>(id, update)?;
        self.client.parse_single(self.transport.execute(request)?)
    }

    fn create<R: Creatable>(&self, input: &R::New) -> Result<R, ApiError> {
        let request = self.client.build_create::<R>(input)?;
        self.client.parse_single(self.transport.execute(request)?)
    }

    fn delete<R: Resource>(&self, id: u64) -> Result<(), ApiError> {
        let request = self.client.build_delete::<R>(id);
        self.client.parse_delete(self.transport.execute(request)?)
    }

    pub fn get_person(&self, id: u64) -> Result<Person, ApiError> {
        self.fetch(id)
    }

    pub fn get_people(&self, options: &ListOptions) -> Result<Vec<Person>, ApiError> {
        self.fetch_all(options)
    }

    pub fn update_person(&self, id: u64, update: &PersonUpdate) -> Result<Person, ApiError> {
        self.update::<Person>(id, update)
    }

    pub fn get_group(&self, id: u64) -> Result<Group, ApiError> {
        self.fetch(id)
    }

    pub fn get_groups(&self, options: &ListOptions) -> Result<Vec<Group>, ApiError> {
        self.fetch_all(options)
    }

    pub fn update_group(&self, id: u64, update: &GroupUpdate) -> Result<Group, ApiError> {
        self.update::<Group>(id, update)
    }

    /// Fetches an event with its dates side-loaded.
    pub fn get_event(&self, id: u64) -> Result<Event, ApiError> {
        self.fetch(id)
    }

    pub fn get_events(&self, options: &ListOptions) -> Result<Vec<Event>, ApiError> {
        self.fetch_all(options)
    }

    pub fn update_event(&self, id: u64, update: &EventUpdate) -> Result<Event, ApiError> {
        self.update::<Event>(id, update)
    }

    pub fn get_role(&self, id: u64) -> Result<Role, ApiError> {
        self.fetch(id)
    }

    pub fn get_roles(&self, options: &ListOptions) -> Result<Vec<Role>, ApiError> {
        self.fetch_all(options)
    }

    pub fn update_role(&self, id: u64, update: &RoleUpdate) -> Result<Role, ApiError> {
        self.update::<Role>(id, update)
    }

    pub fn create_role(&self, input: &NewRole) -> Result<Role, ApiError> {
        self.create::<Role>(input)
    }

    pub fn delete_role(&self, id: u64) -> Result<(), ApiError> {
        self.delete::<Role>(id)
    }

    pub fn get_invoice(&self, id: u64) -> Result<Invoice, ApiError> {
        self.fetch(id)
    }

    pub fn get_invoices(&self, options: &ListOptions) -> Result<Vec<Invoice>, ApiError> {
        self.fetch_all(options)
    }

    pub fn update_invoice(&self, id: u64, update: &InvoiceUpdate) -> Result<Invoice, ApiError> {
        self.update::<Invoice>(id, update)
    }

    pub fn get_mailing_list(&self, id: u64) -> Result<MailingList, ApiError> {
        self.fetch(id)
    }

    pub fn get_mailing_lists(&self, options: &ListOptions) -> Result<Vec<MailingList>, ApiError> {
        self.fetch_all(options)
    }

    pub fn update_mailing_list(
        &self,
        id: u64,
        update: &MailingListUpdate,
    ) -> Result<MailingList, ApiError> {
        self.update::<MailingList>(id, update)
    }

    pub fn get_event_kind(&self, id: u64) -> Result<EventKind, ApiError> {
        self.fetch(id)
    }

    pub fn get_event_kinds(&self, options: &ListOptions) -> Result<Vec<EventKind>, ApiError> {
        self.fetch_all(options)
    }

    pub fn get_event_kind_category(&self, id: u64) -> Result<EventKindCategory, ApiError> {
        self.fetch(id)
    }

    pub fn get_event_kind_categories(
        &self,
        options: &ListOptions,
    ) -> Result<Vec<EventKindCategory>, ApiError> {
        self.fetch_all(options)
    }
}
