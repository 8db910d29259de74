// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Database layer for the Praxis server.
//!
//! One repository per aggregate over a shared SQLite pool. Repositories own
//! their SQL; entity types are plain structs mapped by hand from rows.

pub mod access_log;
pub mod appointment;
pub mod appointment_type;
pub mod error;
pub mod patient;
pub mod pool;
pub mod practice;
pub mod specialization;
pub mod testing;
pub mod therapist;
pub mod workshift;

pub use access_log::{AccessLogRepository, AccessLogStats};
pub use appointment::{
	Appointment, AppointmentDetail, AppointmentFilter, AppointmentRepository, AppointmentUpdate,
	NewAppointment,
};
pub use appointment_type::{
	AppointmentType, AppointmentTypeRepository, AppointmentTypeUpdate, NewAppointmentType,
};
pub use error::DbError;
pub use patient::{NewPatient, Patient, PatientRepository, PatientUpdate};
pub use pool::{create_pool, run_migrations};
pub use practice::{NewPractice, Practice, PracticeRepository, PracticeUpdate};
pub use specialization::{
	NewSpecialization, Specialization, SpecializationRepository, SpecializationUpdate,
};
pub use therapist::{NewTherapist, Therapist, TherapistRepository, TherapistUpdate};
pub use workshift::{
	NewWorkshift, Workshift, WorkshiftDetail, WorkshiftFilter, WorkshiftRepository, WorkshiftUpdate,
};
