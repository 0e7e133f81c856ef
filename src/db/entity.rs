//! Per-table description shared by storage and handlers.

use serde::{Serialize, de::DeserializeOwned};
use sqlx::any::{AnyArguments, AnyRow};
use sqlx::query::Query;
use sqlx::{Any, Row};

use crate::db::models::{Group, GroupPayload, Person, PersonPayload};

pub type AnyQuery<'q> = Query<'q, Any, AnyArguments<'q>>;

/// A table exposed through the five CRUD routes.
pub trait Entity: Sized + Serialize + Send + Sync + 'static {
    type Payload: DeserializeOwned + Send + 'static;

    const TABLE: &'static str;
    /// Every column except `id`, in bind order.
    const COLUMNS: &'static [&'static str];

    const CREATED: &'static str;
    const NOT_FOUND: &'static str;
    const DELETE_NOT_FOUND: &'static str;
    /// Singular display name used in update/delete confirmations.
    const LABEL: &'static str;

    /// Bind the payload fields in [`Entity::COLUMNS`] order.
    fn bind(payload: Self::Payload, query: AnyQuery<'_>) -> AnyQuery<'_>;

    fn from_row(row: &AnyRow) -> Result<Self, sqlx::Error>;

    fn updated_message(id: i64) -> String {
        format!("{} con ID {} actualizado correctamente", Self::LABEL, id)
    }

    fn deleted_message(id: i64) -> String {
        format!("{} con ID {} eliminado correctamente", Self::LABEL, id)
    }
}

impl Entity for Person {
    type Payload = PersonPayload;

    const TABLE: &'static str = "usuarios";
    const COLUMNS: &'static [&'static str] = &["nombre", "apellidos", "sexo", "edad", "telefono"];

    const CREATED: &'static str = "Usuario creado con éxito";
    const NOT_FOUND: &'static str = "Usuario no encontrado";
    const DELETE_NOT_FOUND: &'static str = "No se encontró el usuario para eliminar";
    const LABEL: &'static str = "Usuario";

    fn bind(p: PersonPayload, query: AnyQuery<'_>) -> AnyQuery<'_> {
        query
            .bind(p.nombre)
            .bind(p.apellidos)
            .bind(p.sexo)
            .bind(p.edad)
            .bind(p.telefono)
    }

    fn from_row(row: &AnyRow) -> Result<Self, sqlx::Error> {
        Ok(Person {
            id: row.try_get("id")?,
            nombre: row.try_get("nombre")?,
            apellidos: row.try_get("apellidos")?,
            sexo: row.try_get("sexo")?,
            edad: row.try_get("edad")?,
            telefono: row.try_get("telefono")?,
        })
    }
}

impl Entity for Group {
    type Payload = GroupPayload;

    const TABLE: &'static str = "grupos";
    const COLUMNS: &'static [&'static str] = &["nombre"];

    const CREATED: &'static str = "Grupo creado con éxito";
    const NOT_FOUND: &'static str = "Grupo no encontrado";
    const DELETE_NOT_FOUND: &'static str = "No se encontró el grupo solicitado";
    const LABEL: &'static str = "Grupo";

    fn bind(p: GroupPayload, query: AnyQuery<'_>) -> AnyQuery<'_> {
        query.bind(p.nombre)
    }

    fn from_row(row: &AnyRow) -> Result<Self, sqlx::Error> {
        Ok(Group {
            id: row.try_get("id")?,
            nombre: row.try_get("nombre")?,
        })
    }
}

pub(crate) fn insert_sql<E: Entity>() -> String {
    let placeholders = vec!["?"; E::COLUMNS.len()].join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        E::TABLE,
        E::COLUMNS.join(", "),
        placeholders
    )
}

/// SQLite reports no insert id through the any driver; ask for it instead.
pub(crate) fn insert_returning_id_sql<E: Entity>() -> String {
    format!("{} RETURNING id", insert_sql::<E>())
}

pub(crate) fn select_all_sql<E: Entity>() -> String {
    format!("SELECT * FROM {}", E::TABLE)
}

pub(crate) fn select_by_id_sql<E: Entity>() -> String {
    format!("SELECT * FROM {} WHERE id = ?", E::TABLE)
}

pub(crate) fn update_sql<E: Entity>() -> String {
    let assignments = E::COLUMNS
        .iter()
        .map(|c| format!("{c} = ?"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("UPDATE {} SET {} WHERE id = ?", E::TABLE, assignments)
}

pub(crate) fn delete_sql<E: Entity>() -> String {
    format!("DELETE FROM {} WHERE id = ?", E::TABLE)
}
