//! Failure type shared by every persistence port.

use super::define_port_error;

define_port_error! {
    /// Errors raised by repository adapters.
    ///
    /// Absent records are not errors: lookups return `Option` and deletes
    /// return `bool`, leaving the not-found decision to the caller.
    pub enum PersistenceError {
        /// No connection could be obtained from the store.
        Connection { message: String } =>
            "store connection failed: {message}" as InternalError,
        /// A query or mutation failed while executing.
        Query { message: String } =>
            "store query failed: {message}" as InternalError,
        /// The store rejected the arguments of the query.
        InvalidArgument { message: String } =>
            "invalid query arguments: {message}" as InvalidQuery,
        /// A comment referenced an owner that does not exist.
        MissingParent { parent: String } =>
            "{parent} not found" as NotFound,
    }
}
