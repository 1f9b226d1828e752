use time::{Date, OffsetDateTime, UtcOffset};

use super::labels::*;
use super::{
    amount_input, check_amount, check_currency, check_range, derive_day, minutes_between, require_set,
    require_text, ValidationError,
};
use crate::domain::{FlightEntryMode, PlanItem, TransportKind, TransportMode, TripPlanItemType};
use crate::normalize::{
    iso_date, normalize_currency, normalize_flight_number, optional_text, DEFAULT_CURRENCY,
};
use crate::payload::{
    CreatePlanItemRequest, DestinationTransportDetails, FlightAutofillRequest, FlightDetails,
    PlanItemPayload, MANUAL_FLIGHT_PROVIDER,
};

#[derive(Debug, Clone, PartialEq)]
pub struct TransportDraft {
    pub leg: TransportLeg,
    pub cost: String,
    pub currency: String,
}

impl Default for TransportDraft {
    fn default() -> Self {
        Self {
            leg: TransportLeg::Principal(None),
            cost: String::new(),
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TransportLeg {
    /// `None` until a mode has been picked.
    Principal(Option<PrincipalMode>),
    Local(LocalTransportDraft),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocalTransportDraft {
    pub title: String,
    pub location: String,
    pub start_at: Option<OffsetDateTime>,
    pub end_at: Option<OffsetDateTime>,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PrincipalMode {
    Flight(FlightDraft),
    Train(GroundDraft),
    Bus(GroundDraft),
    Car(CarDraft),
}

#[derive(Debug, Clone, PartialEq)]
pub enum FlightDraft {
    Autofill {
        flight_number: String,
        date: Option<Date>,
    },
    Manual {
        flight_number: String,
        airline: String,
        from: String,
        to: String,
        departure_at: Option<OffsetDateTime>,
        arrival_at: Option<OffsetDateTime>,
        /// Provider of a stored flight being edited; new flights are "manual".
        provider: Option<String>,
    },
}

/// Train or bus leg.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroundDraft {
    pub company: String,
    pub from: String,
    pub to: String,
    pub departure_at: Option<OffsetDateTime>,
    pub arrival_at: Option<OffsetDateTime>,
    pub booking_ref: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CarDraft {
    pub from: String,
    pub to: String,
    pub departure_at: Option<OffsetDateTime>,
    pub arrival_at: Option<OffsetDateTime>,
}

impl TransportDraft {
    pub fn kind(&self) -> TransportKind {
        match self.leg {
            TransportLeg::Principal(_) => TransportKind::Principal,
            TransportLeg::Local(_) => TransportKind::Local,
        }
    }

    pub fn mode(&self) -> Option<TransportMode> {
        match &self.leg {
            TransportLeg::Principal(Some(mode)) => Some(mode.mode()),
            _ => None,
        }
    }

    /// Switching kind starts the new leg blank.
    pub fn set_kind(&mut self, kind: TransportKind) {
        if self.kind() == kind {
            return;
        }
        self.leg = match kind {
            TransportKind::Principal => TransportLeg::Principal(None),
            TransportKind::Local => TransportLeg::Local(LocalTransportDraft::default()),
        };
    }

    /// Select (or clear) the principal mode. `seed` pre-fills the departure.
    pub fn set_mode(&mut self, mode: Option<TransportMode>, seed: Option<OffsetDateTime>) {
        if self.mode() == mode {
            return;
        }
        self.leg = TransportLeg::Principal(mode.map(|mode| PrincipalMode::new(mode, seed)));
    }

    pub fn clear_mode(&mut self) {
        if let TransportLeg::Principal(mode) = &mut self.leg {
            *mode = None;
        }
    }

    pub fn set_flight_entry_mode(&mut self, entry_mode: FlightEntryMode, seed: Option<OffsetDateTime>) {
        if let TransportLeg::Principal(Some(PrincipalMode::Flight(flight))) = &mut self.leg {
            flight.set_entry_mode(entry_mode, seed);
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        match &self.leg {
            TransportLeg::Local(local) => {
                require_text(&local.title, TITLE)?;
                check_range(local.start_at, local.end_at)?;
            }
            TransportLeg::Principal(None) => return Err(ValidationError::MissingMode),
            TransportLeg::Principal(Some(mode)) => mode.validate()?,
        }
        check_amount(&self.cost, COST)?;
        check_currency(&self.currency)?;
        Ok(())
    }

    pub(crate) fn build(&self, preset: Option<Date>) -> Result<PlanItemPayload, ValidationError> {
        let cost = check_amount(&self.cost, COST)?;
        let currency = normalize_currency(&self.currency);
        let base = |item_type, title: String, start_at: Option<OffsetDateTime>, end_at| {
            CreatePlanItemRequest {
                item_type,
                title,
                day: derive_day(start_at, preset),
                start_at,
                end_at,
                location: None,
                notes: None,
                logistics: true,
                cost,
                currency: currency.clone(),
                budget_category: None,
                flight_details: None,
                destination_transport_details: None,
                accommodation_details: None,
            }
        };

        let payload = match &self.leg {
            TransportLeg::Principal(None) => return Err(ValidationError::MissingMode),
            TransportLeg::Local(local) => PlanItemPayload::Create(CreatePlanItemRequest {
                location: optional_text(&local.location),
                notes: optional_text(&local.notes),
                logistics: false,
                ..base(
                    TripPlanItemType::TransportLocal,
                    local.title.trim().to_string(),
                    local.start_at,
                    local.end_at,
                )
            }),
            TransportLeg::Principal(Some(PrincipalMode::Flight(FlightDraft::Autofill {
                flight_number,
                date,
            }))) => {
                let date = date.ok_or(ValidationError::MissingField(FLIGHT_DATE))?;
                PlanItemPayload::FlightAutofill(FlightAutofillRequest {
                    flight_number: normalize_flight_number(flight_number),
                    date: iso_date(date),
                    cost,
                    currency: currency.clone(),
                })
            }
            TransportLeg::Principal(Some(PrincipalMode::Flight(FlightDraft::Manual {
                flight_number,
                airline,
                from,
                to,
                departure_at,
                arrival_at,
                provider,
            }))) => {
                let flight_number = normalize_flight_number(flight_number);
                PlanItemPayload::Create(CreatePlanItemRequest {
                    flight_details: Some(FlightDetails {
                        provider: provider
                            .clone()
                            .unwrap_or_else(|| MANUAL_FLIGHT_PROVIDER.to_string()),
                        flight_number: flight_number.clone(),
                        airline: optional_text(airline),
                        from: optional_text(from),
                        to: optional_text(to),
                        duration_minutes: minutes_between(*departure_at, *arrival_at),
                    }),
                    ..base(TripPlanItemType::Flight, flight_number, *departure_at, *arrival_at)
                })
            }
            TransportLeg::Principal(Some(PrincipalMode::Train(ground)))
            | TransportLeg::Principal(Some(PrincipalMode::Bus(ground))) => {
                let mode = self.mode().unwrap_or(TransportMode::Train);
                let title = format!(
                    "{} {}: {} → {}",
                    mode_title(mode),
                    ground.company.trim(),
                    ground.from.trim(),
                    ground.to.trim()
                );
                PlanItemPayload::Create(CreatePlanItemRequest {
                    destination_transport_details: Some(DestinationTransportDetails {
                        mode,
                        company: optional_text(&ground.company),
                        from: ground.from.trim().to_string(),
                        to: ground.to.trim().to_string(),
                        booking_ref: optional_text(&ground.booking_ref),
                        duration_minutes: minutes_between(ground.departure_at, ground.arrival_at),
                    }),
                    ..base(
                        TripPlanItemType::TransportDestination,
                        title,
                        ground.departure_at,
                        ground.arrival_at,
                    )
                })
            }
            TransportLeg::Principal(Some(PrincipalMode::Car(car))) => {
                let title = format!(
                    "{}: {} → {}",
                    mode_title(TransportMode::Car),
                    car.from.trim(),
                    car.to.trim()
                );
                PlanItemPayload::Create(CreatePlanItemRequest {
                    destination_transport_details: Some(DestinationTransportDetails {
                        mode: TransportMode::Car,
                        company: None,
                        from: car.from.trim().to_string(),
                        to: car.to.trim().to_string(),
                        booking_ref: None,
                        duration_minutes: minutes_between(car.departure_at, car.arrival_at),
                    }),
                    ..base(
                        TripPlanItemType::TransportDestination,
                        title,
                        car.departure_at,
                        car.arrival_at,
                    )
                })
            }
        };
        Ok(payload)
    }

    pub(crate) fn from_item(item: &PlanItem, offset: UtcOffset) -> Self {
        let local = |dt: Option<OffsetDateTime>| dt.map(|dt| dt.to_offset(offset));
        let leg = match item.item_type {
            TripPlanItemType::TransportLocal => TransportLeg::Local(LocalTransportDraft {
                title: item.title.clone(),
                location: item.location.clone().unwrap_or_default(),
                start_at: local(item.start_at),
                end_at: local(item.end_at),
                notes: item.notes.clone().unwrap_or_default(),
            }),
            TripPlanItemType::Flight => {
                let details = item.flight_details.as_ref();
                TransportLeg::Principal(Some(PrincipalMode::Flight(FlightDraft::Manual {
                    flight_number: details
                        .map(|d| d.flight_number.clone())
                        .unwrap_or_else(|| item.title.clone()),
                    airline: details.and_then(|d| d.airline.clone()).unwrap_or_default(),
                    from: details.and_then(|d| d.from.clone()).unwrap_or_default(),
                    to: details.and_then(|d| d.to.clone()).unwrap_or_default(),
                    departure_at: local(item.start_at),
                    arrival_at: local(item.end_at),
                    provider: details.map(|d| d.provider.clone()),
                })))
            }
            _ => {
                let mode = item.destination_transport_details.as_ref().map(|details| {
                    match details.mode {
                        TransportMode::Car => PrincipalMode::Car(CarDraft {
                            from: details.from.clone(),
                            to: details.to.clone(),
                            departure_at: local(item.start_at),
                            arrival_at: local(item.end_at),
                        }),
                        mode => {
                            let ground = GroundDraft {
                                company: details.company.clone().unwrap_or_default(),
                                from: details.from.clone(),
                                to: details.to.clone(),
                                departure_at: local(item.start_at),
                                arrival_at: local(item.end_at),
                                booking_ref: details.booking_ref.clone().unwrap_or_default(),
                            };
                            if mode == TransportMode::Bus {
                                PrincipalMode::Bus(ground)
                            } else {
                                PrincipalMode::Train(ground)
                            }
                        }
                    }
                });
                TransportLeg::Principal(mode)
            }
        };
        Self {
            leg,
            cost: amount_input(item.cost),
            currency: item.currency.clone(),
        }
    }
}

fn mode_title(mode: TransportMode) -> &'static str {
    match mode {
        TransportMode::Flight => "Vuelo",
        TransportMode::Train => "Tren",
        TransportMode::Bus => "Autobús",
        TransportMode::Car => "Coche",
    }
}

impl PrincipalMode {
    pub fn new(mode: TransportMode, seed: Option<OffsetDateTime>) -> Self {
        match mode {
            TransportMode::Flight => PrincipalMode::Flight(FlightDraft::Autofill {
                flight_number: String::new(),
                date: seed.map(|dt| dt.date()),
            }),
            TransportMode::Train => PrincipalMode::Train(GroundDraft {
                departure_at: seed,
                ..GroundDraft::default()
            }),
            TransportMode::Bus => PrincipalMode::Bus(GroundDraft {
                departure_at: seed,
                ..GroundDraft::default()
            }),
            TransportMode::Car => PrincipalMode::Car(CarDraft {
                departure_at: seed,
                ..CarDraft::default()
            }),
        }
    }

    pub fn mode(&self) -> TransportMode {
        match self {
            PrincipalMode::Flight(_) => TransportMode::Flight,
            PrincipalMode::Train(_) => TransportMode::Train,
            PrincipalMode::Bus(_) => TransportMode::Bus,
            PrincipalMode::Car(_) => TransportMode::Car,
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        match self {
            PrincipalMode::Flight(FlightDraft::Autofill {
                flight_number,
                date,
            }) => {
                require_text(flight_number, FLIGHT_NUMBER)?;
                require_set(date, FLIGHT_DATE)
            }
            PrincipalMode::Flight(FlightDraft::Manual {
                flight_number,
                departure_at,
                arrival_at,
                ..
            }) => {
                require_text(flight_number, FLIGHT_NUMBER)?;
                require_set(departure_at, DEPARTURE)?;
                require_set(arrival_at, ARRIVAL)
            }
            PrincipalMode::Train(ground) | PrincipalMode::Bus(ground) => {
                require_text(&ground.company, COMPANY)?;
                require_text(&ground.from, FROM)?;
                require_text(&ground.to, TO)?;
                require_set(&ground.departure_at, DEPARTURE)?;
                require_set(&ground.arrival_at, ARRIVAL)
            }
            PrincipalMode::Car(car) => {
                require_text(&car.from, FROM)?;
                require_text(&car.to, TO)?;
                require_set(&car.departure_at, DEPARTURE)?;
                require_set(&car.arrival_at, ARRIVAL)
            }
        }
    }
}

impl FlightDraft {
    pub fn entry_mode(&self) -> FlightEntryMode {
        match self {
            FlightDraft::Autofill { .. } => FlightEntryMode::Autofill,
            FlightDraft::Manual { .. } => FlightEntryMode::Manual,
        }
    }

    pub fn flight_number(&self) -> &str {
        match self {
            FlightDraft::Autofill { flight_number, .. }
            | FlightDraft::Manual { flight_number, .. } => flight_number,
        }
    }

    /// Keeps the flight number; dates carry over where they can.
    pub fn set_entry_mode(&mut self, entry_mode: FlightEntryMode, seed: Option<OffsetDateTime>) {
        if self.entry_mode() == entry_mode {
            return;
        }
        let flight_number = self.flight_number().to_string();
        let next = match (entry_mode, &*self) {
            (FlightEntryMode::Manual, FlightDraft::Autofill { .. }) => FlightDraft::Manual {
                flight_number,
                airline: String::new(),
                from: String::new(),
                to: String::new(),
                departure_at: seed,
                arrival_at: None,
                provider: None,
            },
            (FlightEntryMode::Autofill, FlightDraft::Manual { departure_at, .. }) => {
                FlightDraft::Autofill {
                    flight_number,
                    date: (*departure_at).or(seed).map(|dt| dt.date()),
                }
            }
            _ => return,
        };
        *self = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    fn principal(mode: PrincipalMode) -> TransportDraft {
        TransportDraft {
            leg: TransportLeg::Principal(Some(mode)),
            ..TransportDraft::default()
        }
    }

    #[test]
    fn principal_without_mode_is_invalid() {
        let draft = TransportDraft::default();
        assert_eq!(draft.validate(), Err(ValidationError::MissingMode));
    }

    #[test]
    fn autofill_needs_number_and_date() {
        let mut draft = principal(PrincipalMode::Flight(FlightDraft::Autofill {
            flight_number: "IB1234".to_string(),
            date: None,
        }));
        assert!(draft.validate().is_err());

        draft.leg = TransportLeg::Principal(Some(PrincipalMode::Flight(FlightDraft::Autofill {
            flight_number: "IB1234".to_string(),
            date: Some(date!(2025 - 07 - 01)),
        })));
        assert_eq!(draft.validate(), Ok(()));
    }

    #[test]
    fn autofill_payload_targets_autofill_endpoint() {
        let draft = principal(PrincipalMode::Flight(FlightDraft::Autofill {
            flight_number: "IB1234".to_string(),
            date: Some(date!(2025 - 07 - 01)),
        }));
        let payload = draft.build(None).unwrap();
        assert_eq!(
            payload,
            PlanItemPayload::FlightAutofill(FlightAutofillRequest {
                flight_number: "IB1234".to_string(),
                date: "2025-07-01".to_string(),
                cost: None,
                currency: "EUR".to_string(),
            })
        );
    }

    #[test]
    fn manual_flight_nests_details() {
        let draft = principal(PrincipalMode::Flight(FlightDraft::Manual {
            flight_number: "vy 8001".to_string(),
            airline: "Vueling".to_string(),
            from: "BCN".to_string(),
            to: "".to_string(),
            departure_at: Some(datetime!(2025-07-01 07:00 UTC)),
            arrival_at: Some(datetime!(2025-07-01 08:30 UTC)),
            provider: None,
        }));
        let PlanItemPayload::Create(body) = draft.build(None).unwrap() else {
            panic!("expected generic create");
        };
        assert_eq!(body.item_type, TripPlanItemType::Flight);
        assert!(body.logistics);
        assert_eq!(body.title, "VY8001");
        assert_eq!(body.day.as_deref(), Some("2025-07-01T00:00:00.000Z"));
        let details = body.flight_details.unwrap();
        assert_eq!(details.provider, "manual");
        assert_eq!(details.to, None);
        assert_eq!(details.duration_minutes, Some(90));
    }

    #[test]
    fn train_requires_company_and_route() {
        let mut ground = GroundDraft {
            from: "Madrid".to_string(),
            to: "Sevilla".to_string(),
            departure_at: Some(datetime!(2025-07-02 09:00 UTC)),
            arrival_at: Some(datetime!(2025-07-02 11:30 UTC)),
            ..GroundDraft::default()
        };
        assert_eq!(
            principal(PrincipalMode::Train(ground.clone())).validate(),
            Err(ValidationError::MissingField(COMPANY))
        );

        ground.company = "Renfe".to_string();
        let draft = principal(PrincipalMode::Bus(ground));
        let PlanItemPayload::Create(body) = draft.build(None).unwrap() else {
            panic!("expected generic create");
        };
        assert_eq!(body.item_type, TripPlanItemType::TransportDestination);
        assert_eq!(body.title, "Autobús Renfe: Madrid → Sevilla");
        let details = body.destination_transport_details.unwrap();
        assert_eq!(details.mode, TransportMode::Bus);
        assert_eq!(details.duration_minutes, Some(150));
    }

    #[test]
    fn car_needs_no_company() {
        let draft = principal(PrincipalMode::Car(CarDraft {
            from: "Madrid".to_string(),
            to: "Toledo".to_string(),
            departure_at: Some(datetime!(2025-07-03 10:00 UTC)),
            arrival_at: Some(datetime!(2025-07-03 11:00 UTC)),
        }));
        assert_eq!(draft.validate(), Ok(()));
        let PlanItemPayload::Create(body) = draft.build(None).unwrap() else {
            panic!("expected generic create");
        };
        assert_eq!(
            body.destination_transport_details.map(|d| d.mode),
            Some(TransportMode::Car)
        );
    }

    #[test]
    fn local_leg_checks_title_range_and_cost() {
        let mut draft = TransportDraft::default();
        draft.set_kind(TransportKind::Local);
        assert_eq!(draft.validate(), Err(ValidationError::MissingField(TITLE)));

        if let TransportLeg::Local(local) = &mut draft.leg {
            local.title = "Metro al centro".to_string();
            local.start_at = Some(datetime!(2025-07-02 10:00 UTC));
            local.end_at = Some(datetime!(2025-07-02 09:00 UTC));
        }
        assert_eq!(draft.validate(), Err(ValidationError::InvalidDateRange));

        if let TransportLeg::Local(local) = &mut draft.leg {
            local.end_at = None;
        }
        draft.cost = "abc".to_string();
        assert_eq!(draft.validate(), Err(ValidationError::InvalidNumber(COST)));

        draft.cost = "2,40".to_string();
        let PlanItemPayload::Create(body) = draft.build(Some(date!(2025 - 07 - 09))).unwrap() else {
            panic!("expected generic create");
        };
        assert_eq!(body.item_type, TripPlanItemType::TransportLocal);
        assert!(!body.logistics);
        assert_eq!(body.cost, Some(2.4));
        assert_eq!(body.day.as_deref(), Some("2025-07-02T00:00:00.000Z"));
    }

    #[test]
    fn mode_selection_seeds_departure() {
        let seed = Some(datetime!(2025-08-01 09:00 UTC));
        let mut draft = TransportDraft::default();
        draft.set_mode(Some(TransportMode::Train), seed);
        let TransportLeg::Principal(Some(PrincipalMode::Train(ground))) = &draft.leg else {
            panic!("expected train");
        };
        assert_eq!(ground.departure_at, seed);

        draft.set_mode(Some(TransportMode::Flight), seed);
        let TransportLeg::Principal(Some(PrincipalMode::Flight(flight))) = &draft.leg else {
            panic!("expected flight");
        };
        assert_eq!(
            flight,
            &FlightDraft::Autofill {
                flight_number: String::new(),
                date: Some(date!(2025 - 08 - 01)),
            }
        );
    }

    #[test]
    fn entry_mode_switch_keeps_flight_number() {
        let mut flight = FlightDraft::Autofill {
            flight_number: "IB1234".to_string(),
            date: Some(date!(2025 - 07 - 01)),
        };
        flight.set_entry_mode(FlightEntryMode::Manual, None);
        assert_eq!(flight.entry_mode(), FlightEntryMode::Manual);
        assert_eq!(flight.flight_number(), "IB1234");

        if let FlightDraft::Manual { departure_at, .. } = &mut flight {
            *departure_at = Some(datetime!(2025-07-05 18:00 UTC));
        }
        flight.set_entry_mode(FlightEntryMode::Autofill, None);
        assert_eq!(
            flight,
            FlightDraft::Autofill {
                flight_number: "IB1234".to_string(),
                date: Some(date!(2025 - 07 - 05)),
            }
        );
    }
}
