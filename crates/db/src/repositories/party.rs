//! Customer and supplier repositories.
//!
//! Running balances are adjusted only through the `pub(crate)` helpers that
//! take an open transaction handle, which keeps the adjustments inside the
//! order coordinators' atomic units. The update inputs expose a direct
//! balance override for administrative correction; that override is a
//! deliberate bypass of the tracker.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    DbErr, EntityTrait, QueryFilter, QueryOrder, Set, Statement,
};
use uuid::Uuid;

use crate::entities::{customers, suppliers};
use stockbook_core::orders::OrderError;
use stockbook_shared::types::{CustomerId, SupplierId};

/// Error types for party operations.
#[derive(Debug, thiserror::Error)]
pub enum PartyError {
    /// Customer not found.
    #[error("Customer not found: {0}")]
    CustomerNotFound(Uuid),

    /// Supplier not found.
    #[error("Supplier not found: {0}")]
    SupplierNotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a customer.
#[derive(Debug, Clone)]
pub struct CreateCustomerInput {
    /// Customer name.
    pub name: String,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Postal address.
    pub address: Option<String>,
    /// Credit limit; defaults to zero.
    pub credit_limit: Option<Decimal>,
}

/// Input for updating a customer.
#[derive(Debug, Clone, Default)]
pub struct UpdateCustomerInput {
    /// New name.
    pub name: Option<String>,
    /// New contact email.
    pub email: Option<String>,
    /// New contact phone.
    pub phone: Option<String>,
    /// New postal address.
    pub address: Option<String>,
    /// New credit limit.
    pub credit_limit: Option<Decimal>,
    /// Administrative balance override.
    pub balance: Option<Decimal>,
    /// Activate or deactivate.
    pub active: Option<bool>,
}

/// Input for creating a supplier.
#[derive(Debug, Clone)]
pub struct CreateSupplierInput {
    /// Supplier name.
    pub name: String,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Postal address.
    pub address: Option<String>,
}

/// Input for updating a supplier.
#[derive(Debug, Clone, Default)]
pub struct UpdateSupplierInput {
    /// New name.
    pub name: Option<String>,
    /// New contact email.
    pub email: Option<String>,
    /// New contact phone.
    pub phone: Option<String>,
    /// New postal address.
    pub address: Option<String>,
    /// Administrative balance override.
    pub balance: Option<Decimal>,
    /// Activate or deactivate.
    pub active: Option<bool>,
}

/// Customer repository.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    db: DatabaseConnection,
}

impl CustomerRepository {
    /// Creates a new customer repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a customer with a zero opening balance.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create(
        &self,
        input: CreateCustomerInput,
    ) -> Result<customers::Model, PartyError> {
        let now = Utc::now().into();
        let customer = customers::ActiveModel {
            id: Set(CustomerId::new().into_inner()),
            name: Set(input.name),
            email: Set(input.email),
            phone: Set(input.phone),
            address: Set(input.address),
            balance: Set(Decimal::ZERO),
            credit_limit: Set(input.credit_limit.unwrap_or(Decimal::ZERO)),
            active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };
        Ok(customer.insert(&self.db).await?)
    }

    /// Gets a customer by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the customer does not exist.
    pub async fn get(&self, id: CustomerId) -> Result<customers::Model, PartyError> {
        customers::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(PartyError::CustomerNotFound(id.into_inner()))
    }

    /// Lists customers by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(&self, active_only: bool) -> Result<Vec<customers::Model>, PartyError> {
        let mut query = customers::Entity::find();
        if active_only {
            query = query.filter(customers::Column::Active.eq(true));
        }
        Ok(query
            .order_by_asc(customers::Column::Name)
            .all(&self.db)
            .await?)
    }

    /// Updates a customer.
    ///
    /// # Errors
    ///
    /// Returns an error if the customer does not exist.
    pub async fn update(
        &self,
        id: CustomerId,
        input: UpdateCustomerInput,
    ) -> Result<customers::Model, PartyError> {
        let customer = self.get(id).await?;

        let mut active_model: customers::ActiveModel = customer.into();
        if let Some(name) = input.name {
            active_model.name = Set(name);
        }
        if let Some(email) = input.email {
            active_model.email = Set(Some(email));
        }
        if let Some(phone) = input.phone {
            active_model.phone = Set(Some(phone));
        }
        if let Some(address) = input.address {
            active_model.address = Set(Some(address));
        }
        if let Some(credit_limit) = input.credit_limit {
            active_model.credit_limit = Set(credit_limit);
        }
        if let Some(balance) = input.balance {
            active_model.balance = Set(balance);
        }
        if let Some(active) = input.active {
            active_model.active = Set(active);
        }
        active_model.updated_at = Set(Utc::now().into());

        Ok(active_model.update(&self.db).await?)
    }
}

/// Supplier repository.
#[derive(Debug, Clone)]
pub struct SupplierRepository {
    db: DatabaseConnection,
}

impl SupplierRepository {
    /// Creates a new supplier repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a supplier with a zero opening balance.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create(
        &self,
        input: CreateSupplierInput,
    ) -> Result<suppliers::Model, PartyError> {
        let now = Utc::now().into();
        let supplier = suppliers::ActiveModel {
            id: Set(SupplierId::new().into_inner()),
            name: Set(input.name),
            email: Set(input.email),
            phone: Set(input.phone),
            address: Set(input.address),
            balance: Set(Decimal::ZERO),
            active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };
        Ok(supplier.insert(&self.db).await?)
    }

    /// Gets a supplier by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the supplier does not exist.
    pub async fn get(&self, id: SupplierId) -> Result<suppliers::Model, PartyError> {
        suppliers::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(PartyError::SupplierNotFound(id.into_inner()))
    }

    /// Lists suppliers by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(&self, active_only: bool) -> Result<Vec<suppliers::Model>, PartyError> {
        let mut query = suppliers::Entity::find();
        if active_only {
            query = query.filter(suppliers::Column::Active.eq(true));
        }
        Ok(query
            .order_by_asc(suppliers::Column::Name)
            .all(&self.db)
            .await?)
    }

    /// Updates a supplier.
    ///
    /// # Errors
    ///
    /// Returns an error if the supplier does not exist.
    pub async fn update(
        &self,
        id: SupplierId,
        input: UpdateSupplierInput,
    ) -> Result<suppliers::Model, PartyError> {
        let supplier = self.get(id).await?;

        let mut active_model: suppliers::ActiveModel = supplier.into();
        if let Some(name) = input.name {
            active_model.name = Set(name);
        }
        if let Some(email) = input.email {
            active_model.email = Set(Some(email));
        }
        if let Some(phone) = input.phone {
            active_model.phone = Set(Some(phone));
        }
        if let Some(address) = input.address {
            active_model.address = Set(Some(address));
        }
        if let Some(balance) = input.balance {
            active_model.balance = Set(balance);
        }
        if let Some(active) = input.active {
            active_model.active = Set(active);
        }
        active_model.updated_at = Set(Utc::now().into());

        Ok(active_model.update(&self.db).await?)
    }
}

/// Atomically increments a customer's receivable balance inside an order
/// transaction.
pub(crate) async fn adjust_customer_balance(
    txn: &DatabaseTransaction,
    id: CustomerId,
    delta: Decimal,
) -> Result<(), OrderError> {
    let result = txn
        .execute(Statement::from_sql_and_values(
            sea_orm::DatabaseBackend::Postgres,
            "UPDATE customers
             SET balance = balance + $1, updated_at = NOW()
             WHERE id = $2",
            [delta.into(), id.into_inner().into()],
        ))
        .await
        .map_err(|e| OrderError::Database(e.to_string()))?;

    if result.rows_affected() == 0 {
        return Err(OrderError::CustomerNotFound(id.into_inner()));
    }
    Ok(())
}

/// Atomically increments a supplier's payable balance inside an order
/// transaction.
pub(crate) async fn adjust_supplier_balance(
    txn: &DatabaseTransaction,
    id: SupplierId,
    delta: Decimal,
) -> Result<(), OrderError> {
    let result = txn
        .execute(Statement::from_sql_and_values(
            sea_orm::DatabaseBackend::Postgres,
            "UPDATE suppliers
             SET balance = balance + $1, updated_at = NOW()
             WHERE id = $2",
            [delta.into(), id.into_inner().into()],
        ))
        .await
        .map_err(|e| OrderError::Database(e.to_string()))?;

    if result.rows_affected() == 0 {
        return Err(OrderError::SupplierNotFound(id.into_inner()));
    }
    Ok(())
}
