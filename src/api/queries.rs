// src/api/queries.rs
//! The fixed batch of GraphQL documents sent for every property.
//!
//! One request carries seven facet documents. The portal answers with a
//! JSON array in the same order, so a facet's slot is also where the parser
//! finds its answer.

use crate::constants::FINANCIAL_CURRENCY_CODE;
use crate::types::PropertyId;
use serde_json::{json, Value};
use std::fmt;

/// One thematic sub-query of the batch, in slot order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facet {
    Amenities,
    UnitMix,
    Owners,
    Location,
    Comparables,
    Contacts,
    PropertyDetails,
}

impl Facet {
    pub const ALL: [Facet; 7] = [
        Self::Amenities,
        Self::UnitMix,
        Self::Owners,
        Self::Location,
        Self::Comparables,
        Self::Contacts,
        Self::PropertyDetails,
    ];

    /// Position of this facet in the request and in the response array.
    pub fn slot(self) -> usize {
        match self {
            Self::Amenities => 0,
            Self::UnitMix => 1,
            Self::Owners => 2,
            Self::Location => 3,
            Self::Comparables => 4,
            Self::Contacts => 5,
            Self::PropertyDetails => 6,
        }
    }

    pub fn operation_name(self) -> &'static str {
        match self {
            Self::Amenities => "Amenities_Info",
            Self::UnitMix => "UnitMix_Detail",
            Self::Owners => "About_Info",
            Self::Location => "Location_Info",
            Self::Comparables => "getCompsContext",
            Self::Contacts => "ContactsDetail",
            Self::PropertyDetails => "getPropertyInfo",
        }
    }

    fn document(self) -> &'static str {
        match self {
            Self::Amenities => AMENITIES_QUERY,
            Self::UnitMix => UNIT_MIX_QUERY,
            Self::Owners => OWNERS_QUERY,
            Self::Location => LOCATION_QUERY,
            Self::Comparables => COMPS_QUERY,
            Self::Contacts => CONTACTS_QUERY,
            Self::PropertyDetails => PROPERTY_INFO_QUERY,
        }
    }

    fn variables(self, id: PropertyId) -> Value {
        let property_id = id.value();
        match self {
            Self::UnitMix => json!({ "propertyId": property_id, "showOnlyActual": false }),
            Self::PropertyDetails => {
                json!({ "propertyId": property_id, "currencyCode": FINANCIAL_CURRENCY_CODE })
            }
            _ => json!({ "propertyId": property_id }),
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.operation_name())
    }
}

/// The seven facet documents bound to one property.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestBatch {
    id: PropertyId,
    documents: Vec<Value>,
}

impl RequestBatch {
    pub fn id(&self) -> PropertyId {
        self.id
    }

    pub fn documents(&self) -> &[Value] {
        &self.documents
    }

    pub fn document(&self, facet: Facet) -> Option<&Value> {
        self.documents.get(facet.slot())
    }

    /// The request body: a JSON array of the facet documents.
    pub fn payload(&self) -> String {
        Value::Array(self.documents.clone()).to_string()
    }
}

/// Builds the request batch for one property. Deterministic and pure.
pub fn build(id: PropertyId) -> RequestBatch {
    let documents = Facet::ALL
        .iter()
        .map(|facet| {
            json!({
                "operationName": facet.operation_name(),
                "query": facet.document(),
                "variables": facet.variables(id),
            })
        })
        .collect();
    RequestBatch { id, documents }
}

const AMENITIES_QUERY: &str = r#"query Amenities_Info($propertyId: Int!) {
  propertyDetail {
    amenities_Info(propertyId: $propertyId) {
      ...amenitiesICFields
      __typename
    }
    __typename
  }
}

fragment amenitiesICFields on Amenities_Info {
  propertyType
  amenities
  unitAmenities
  roomAmenities
  __typename
}
"#;

const UNIT_MIX_QUERY: &str = r#"fragment unitMixDetail on UnitMixDetailItem {
  totals
  bath
  availableUnits
  availablePercent
  askingRentPerArea
  askingRentPerUnit
  averageArea
  effectiveRentPerUnit
  effectiveRentPerArea
  bedroom
  concessions
  unitMixUnits
  unitMixPercentage
  isRentModeled
  isEffectiveRentModeled
  isAvailableModeled
  unitMixBeds
  unitMixBedsPercent
  averageAskingRentPerOccupantBed
  averageEffectiveRentPerOccupantBed
  __typename
}

query UnitMix_Detail($propertyId: Int!, $showOnlyActual: Boolean) {
  propertyDetail {
    unit_mix_detail(propertyId: $propertyId, showOnlyActual: $showOnlyActual) {
      detailItems {
        ...unitMixDetail
        __typename
      }
      summaryItems {
        ...unitMixDetail
        __typename
      }
      updatedDate
      __typename
    }
    __typename
  }
}
"#;

const OWNERS_QUERY: &str = r#"query About_Info($propertyId: Int!) {
  propertyDetail {
    propertyContactDetails_info(propertyId: $propertyId) {
      ...aboutICFields
      __typename
    }
    __typename
  }
}

fragment aboutICFields on PropertyContactDetails_Info {
  trueOwner {
    ...companyDetailFields
    __typename
  }
  architect {
    ...companyDetailFields
    __typename
  }
  __typename
}

fragment companyDetailFields on PropertyContactDetails_Company {
  companyId
  name
  address
  suite
  website {
    uri
    hostName
    __typename
  }
  phoneNumbers
  logoImage
  availableInProfessionalDirectory
  dateAssumedRole
  bio
  __typename
}
"#;

const LOCATION_QUERY: &str = r#"query Location_Info($propertyId: Int!) {
  propertyDetail {
    location_Info(propertyId: $propertyId) {
      ...locationICFields
      __typename
    }
    __typename
  }
}

fragment locationICFields on Location_Info {
  secondaryDeliveryAddress
  postalCode
  submarket
  cluster
  locationType
  market
  county
  subDivision
  regionName
  cbsa
  dma
  country
  __typename
}
"#;

const COMPS_QUERY: &str = r#"query getCompsContext($propertyId: Int!) {
  propertyDetail {
    get_comps_context(propertyId: $propertyId) {
      compsContext {
        Source
        Survey {
          DisplayName
          SurveyId
          SurveyName
          __typename
        }
        CompanyCompSetCount
        MapShape {
          Radii {
            Center {
              coordinates
              type
              __typename
            }
            City
            Kml
            LookupText
            SubdivisionCode
            Radius {
              Code
              Value
              __typename
            }
            __typename
          }
          Corridors {
            Corridor {
              coordinates
              __typename
            }
            __typename
          }
          __typename
        }
        CompEntities {
          EntityId
          PropertyIndex
          __typename
        }
        __typename
      }
      isCollaborationSourceViable
      detailPageContext {
        CountryCode
        Location {
          Latitude
          Longitude
          __typename
        }
        PropertyId
        PropertyTypeDescription
        PropertyTypeId
        __typename
      }
      __typename
    }
    __typename
  }
}
"#;

const CONTACTS_QUERY: &str = r#"query ContactsDetail($propertyId: Int!) {
  propertyDetail {
    propertyContactDetails_info(propertyId: $propertyId) {
      ...contactDetailsICFields
      __typename
    }
    propertyDetailHeader(propertyId: $propertyId) {
      id
      addressHeader
      __typename
    }
    __typename
  }
}

fragment contactDetailsICFields on PropertyContactDetails_Info {
  coStarResearchContact {
    ...propertyCompanyFields
    __typename
  }
  primaryLeasingCompany {
    ...propertyCompanyFields
    __typename
  }
  leasingCompany {
    ...propertyCompanyFields
    __typename
  }
  subletCompany {
    ...propertyCompanyFields
    __typename
  }
  salesCompany {
    ...propertyCompanyFields
    __typename
  }
  recordedOwner {
    ...propertyCompanyFields
    __typename
  }
  trueOwner {
    ...propertyCompanyFields
    __typename
  }
  hotelOperator {
    ...propertyCompanyFields
    __typename
  }
  assetManager {
    ...propertyCompanyFields
    __typename
  }
  propertyManager {
    ...propertyCompanyFields
    __typename
  }
  previousRecordedOwner {
    ...propertyCompanyFields
    __typename
  }
  previousTrueOwner {
    ...propertyCompanyFields
    __typename
  }
  parentCompany {
    ...propertyCompanyFields
    __typename
  }
  developer {
    ...propertyCompanyFields
    __typename
  }
  architect {
    ...propertyCompanyFields
    __typename
  }
  coWorkingCompany {
    ...propertyCompanyFields
    __typename
  }
  deliveryAddress
  emailSubject
  __typename
}

fragment propertyContactFields on PropertyContactDetails_Contact {
  personId
  title
  name
  email
  phoneNumbers
  thumbnail
  availableInProfessionalDirectory
  withCompanyId
  withCompanyName
  withCompanyAddress
  managerEmailAddress
  __typename
}

fragment propertyCompanyFields on PropertyContactDetails_Company {
  ...companyDetailFields
  contacts {
    ...propertyContactFields
    __typename
  }
  __typename
}

fragment companyDetailFields on PropertyContactDetails_Company {
  companyId
  name
  address
  suite
  website {
    uri
    hostName
    __typename
  }
  phoneNumbers
  logoImage
  availableInProfessionalDirectory
  dateAssumedRole
  bio
  __typename
}
"#;

const PROPERTY_INFO_QUERY: &str = r#"query getPropertyInfo($propertyId: Int!, $currencyCode: String) {
  propertyDetail {
    property_info(propertyId: $propertyId, currencyCode: $currencyCode) {
      ad
      address {
        buildingName
        city
        cityId
        county
        deliveryAddress
        postalCode
        countryCode
        regionId
        regionName
        state
        stateId
        streetDirId
        streetName
        streetNum
        streetNumEnd
        streetSuffixId
        streetTypeId
        __typename
      }
      avgAskingRentPerBed
      bathBedRatio
      bldgClass
      buildingAreaTotal
      buildingAreaUom
      buildingName
      buildingNumber
      buildingRating
      buildMonth
      cluster
      companies {
        recordedOwners {
          companyId
          name
          originType
          ownerSuperTypeId
          ownerTypeId
          __typename
        }
        trueOwners {
          companyId
          name
          originType
          ownerSuperTypeId
          ownerTypeId
          __typename
        }
        __typename
      }
      constructionStartMonth
      constructionStartYear
      constructionStatus
      currency
      floorArea
      forLease {
        areaTotal
        areaUom
        contigArea
        rentActMax
        rentActMin
        rentBasis
        rentEstMax
        rentEstMin
        spaceCount
        tmi
        __typename
      }
      forSale {
        buildingAreaUom
        capRateMax
        capRateMin
        company
        companyId
        condoOnly
        contactFirstName
        contactId
        contactLastName
        contactPhone
        dateOnMarket
        itemType
        phoneCountryCode
        pricePerAcreMax
        pricePerBuildingAreaMax
        pricePerBuildingAreaMin
        pricePerItemMax
        pricePerItemMin
        salePrice
        statusId
        __typename
      }
      industrial {
        driveInsHeight
        driveInsWidth
        hasCranes
        hasDriveInBay
        hasHeavyPower
        hasLoadingDocks
        hasRail
        maxColumnDepthFeet
        maxColumnWidthFeet
        numOfCranes
        numOfDriveIns
        numOfExternalLoadingDocks
        numOfInternalLoadingDocks
        numOfLoadingDocks
        railLine
        sewer
        __typename
      }
      institutionName
      isBreeam
      isLeed
      isOpportunityZone
      landAreaTotal
      landAreaUom
      landType
      latitude
      longitude
      mapBookName
      mapPageNum
      mapXCoordinate
      mapYCoordinate
      market
      maxCeilingHt
      metro
      minAreaMeasure
      minAreaPerLot
      minCeilingHt
      multiFamily {
        affordabilityType
        apartmentLifestyleType
        apartmentRentType
        apartmentStyleType
        askingRentPerSqFt
        askingRentPerUnit
        avgUnitSize
        concession
        effRentPerSqFt
        effRentPerUnit
        numOfBuildings
        numOfUnits
        parkingSpacesPerUnit
        percent1Bed
        percent2Bed
        percent3Bed
        percent4Bed
        percentStudio
        vacancyPercent
        __typename
      }
      numOfBeds
      numOfParkingSpaces
      numOfRooms
      numOfStories
      parkingRatio
      percentLeased
      primaryLeasingInfo {
        company
        companyId
        contactFirstName
        contactLastName
        contactPhone
        phoneCountryCode
        __typename
      }
      primaryPhoto {
        caption
        url
        __typename
      }
      propertyGroupName
      propertySubtype
      propertyGroupType
      propertyId
      propertyType
      proposedLandUse
      renovationMonth
      renovationYear
      retailLoc
      singleTenancyState
      submarket
      yearBuilt
      zoning
      __typename
    }
    __typename
  }
}
"#;
