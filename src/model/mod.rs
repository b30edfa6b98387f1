//! Typed entity graph produced by the decomposer.
//!
//! Every flat record is declared once with [`entity!`]: the struct, its
//! `from_fields` constructor and its table definition all come from the same
//! field list, so the persisted schema cannot drift from the Rust type.

/// Declares a flat entity.
///
/// `key` fields form the primary key, `fields` are plain columns and
/// `children` are owned collections filled in by the decomposer after
/// construction (they are not columns). `references` names the parent table
/// whose primary key the listed columns point to.
macro_rules! entity {
    (@parent) => {
        None
    };
    (@parent $table:literal ($($column:ident),+)) => {
        Some($crate::model::ForeignKey {
            table: $table,
            columns: &[$(stringify!($column)),+],
        })
    };
    (
        $(#[$meta:meta])*
        pub struct $name:ident in $table:literal $(references $ptable:literal ($($pcolumn:ident),+))? {
            key { $($key:ident: $key_ty:ty),+ $(,)? }
            fields { $($field:ident: $field_ty:ty),* $(,)? }
            $(children { $($child:ident: $child_ty:ty),+ $(,)? })?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize)]
        pub struct $name {
            $(pub $key: $key_ty,)+
            $(pub $field: $field_ty,)*
            $($(pub $child: $child_ty,)+)?
        }

        impl $name {
            pub const TABLE: $crate::model::TableDef = $crate::model::TableDef {
                name: $table,
                columns: &[
                    $($crate::model::Column::of::<$key_ty>(stringify!($key)),)+
                    $($crate::model::Column::of::<$field_ty>(stringify!($field)),)*
                ],
                key: &[$(stringify!($key)),+],
                parent: entity!(@parent $($ptable ($($pcolumn),+))?),
            };

            pub(crate) fn from_fields(
                fields: &$crate::model::Fields<'_>,
            ) -> Result<Self, $crate::error::AppError> {
                Ok($name {
                    $($key: fields.get(stringify!($key))?,)+
                    $($field: fields.get(stringify!($field))?,)*
                    $($($child: Default::default(),)+)?
                })
            }
        }
    };
}

mod field;
pub mod league;
pub mod matches;
pub mod record;
pub mod summoner;
pub mod timeline;

pub use field::{FieldValue, Fields};
pub use league::{LeagueEntry, LeagueItem, LeagueListing, MiniSeries};
pub use matches::{Ban, MatchInfo, MatchParticipant, MatchTeam, Objective, StatPerk, StylePerk};
pub use record::{EntityKind, Flatten, Record};
pub use summoner::SummonerProfile;
pub use timeline::{TimelineEvent, TimelineParticipantFrame};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub sql_type: &'static str,
    pub nullable: bool,
}

impl Column {
    pub const fn of<T: FieldValue>(name: &'static str) -> Column {
        Column {
            name,
            sql_type: T::SQL_TYPE,
            nullable: T::NULLABLE,
        }
    }
}

/// Columns of the child that point at the parent's primary key (same names on both sides).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignKey {
    pub table: &'static str,
    pub columns: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableDef {
    pub name: &'static str,
    pub columns: &'static [Column],
    pub key: &'static [&'static str],
    pub parent: Option<ForeignKey>,
}

impl TableDef {
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn is_key(&self, name: &str) -> bool {
        self.key.contains(&name)
    }
}
