pub mod incident_handler;

pub use incident_handler::{
    __path_create_incident, __path_get_catalog, __path_get_incident, __path_list_incidents,
    __path_submit_incident, create_incident, get_catalog, get_incident, list_incidents,
    submit_incident,
};
