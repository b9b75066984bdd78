//! Common object exports for tests.
//!
//! Each fixture is a complete, well-formed export of one object type and
//! parses without diagnostics.

pub const TABLE: &str = r#"OBJECT Table 18 Customer
{
  OBJECT-PROPERTIES
  {
    Date=26.03.19;
    Time=12:00:00;
    Version List=NAVW111.00;
  }
  PROPERTIES
  {
    DataCaptionFields=No.,Name;
    Permissions=TableData 21=r;
    OnInsert=BEGIN
               IF "No." = '' THEN BEGIN
                 SalesSetup.GET;
                 NoSeriesMgt.InitSeries(SalesSetup."Customer Nos.",xRec."No. Series",0D,"No.","No. Series");
               END;
             END;

    CaptionML=[ENU=Customer;
               DEU=Debitor];
    LookupPageID=Page22;
  }
  FIELDS
  {
    { 1   ;   ;No.                 ;Code20        ;OnValidate=BEGIN
                                                                IF "No." <> xRec."No." THEN
                                                                  "No. Series" := '';
                                                              END;

                                                   AltSearchField=Search Name;
                                                   CaptionML=ENU=No. }
    { 2   ;   ;Name                ;Text50        ;CaptionML=ENU=Name }
    { 3   ;   ;Search Name         ;Code50        ;CaptionML=ENU=Search Name }
    { 39  ;   ;Blocked             ;Option        ;CaptionML=ENU=Blocked;
                                                   OptionCaptionML=ENU=" ,Ship,Invoice,All";
                                                   OptionString=[ ,Ship,Invoice,All] }
    { 59  ;   ;Balance             ;Decimal       ;FieldClass=FlowField;
                                                   CalcFormula=Sum("Detailed Cust. Ledg. Entry".Amount WHERE (Customer No.=FIELD(No.)));
                                                   Editable=No;
                                                   AutoFormatType=1 }
  }
  KEYS
  {
    {    ;No.                                     ;Clustered=Yes }
    {    ;Search Name                              }
    {    ;Customer Posting Group                   }
  }
  FIELDGROUPS
  {
    { 1   ;DropDown            ;No.,Name,City                           }
  }
  CODE
  {
    VAR
      Text000@1000 : TextConst 'ENU=You cannot delete %1 %2 because there is at least one outstanding Sales %3 for this customer.';
      SalesSetup@1001 : Record 311;
      NoSeriesMgt@1002 : Codeunit 396;

    PROCEDURE AssistEdit@2(OldCust@1000 : Record 18) : Boolean;
    VAR
      Cust@1001 : Record 18;
    BEGIN
      WITH Cust DO BEGIN
        Cust := Rec;
        SalesSetup.GET;
        IF NoSeriesMgt.SelectSeries(SalesSetup."Customer Nos.",OldCust."No. Series","No. Series") THEN BEGIN
          NoSeriesMgt.SetSeries("No.");
          Rec := Cust;
          EXIT(TRUE);
        END;
      END;
    END;

    [External]
    PROCEDURE GetTotalBalance@3() Total@1000 : Decimal;
    BEGIN
      CALCFIELDS(Balance);
      Total := 0;
      Total += Balance;
    END;

    BEGIN
    {
      Customer master data
    }
    END.
  }
}
"#;

pub const PAGE: &str = r#"OBJECT Page 22 Customer List
{
  OBJECT-PROPERTIES
  {
    Date=26.03.19;
    Time=12:00:00;
    Version List=NAVW111.00;
  }
  PROPERTIES
  {
    Editable=No;
    CaptionML=ENU=Customer List;
    SourceTable=Table18;
    PageType=List;
    CardPageID=Customer Card;
    OnOpenPage=BEGIN
                 SetFilterOnStatus;
               END;

    ActionList=ACTIONS
    {
      { 1900000003;0 ;ActionContainer;
                      ActionContainerType=RelatedInformation }
      { 7       ;1   ;ActionGroup;
                      CaptionML=ENU=&Customer;
                      Image=Customer }
      { 8       ;2   ;Action    ;
                      ShortCutKey=Shift+F7;
                      CaptionML=ENU=Card;
                      RunObject=Page 21;
                      RunPageLink=No.=FIELD(No.);
                      Promoted=Yes;
                      Image=EditLines;
                      OnAction=BEGIN
                                 PAGE.RUN(PAGE::"Customer Card",Rec);
                               END;
                                }
    }
  }
  CONTROLS
  {
    { 1900000001;0;Container;
                ContainerType=ContentArea }

    { 1   ;1   ;Group     ;
                GroupType=Repeater }

    { 2   ;2   ;Field     ;
                SourceExpr="No." }

    { 4   ;2   ;Field     ;
                SourceExpr=Name }

  }
  CODE
  {

    LOCAL PROCEDURE SetFilterOnStatus@1();
    BEGIN
      SETRANGE(Blocked,Blocked::" ");
    END;

    BEGIN
    END.
  }
}
"#;

pub const REPORT: &str = r#"OBJECT Report 101 Customer - List
{
  OBJECT-PROPERTIES
  {
    Date=26.03.19;
    Time=12:00:00;
    Version List=NAVW111.00;
  }
  PROPERTIES
  {
    CaptionML=ENU=Customer - List;
    OnPreReport=BEGIN
                  CustFilter := Customer.GETFILTERS;
                END;

  }
  DATASET
  {
    { 6836;    ;DataItem;                    ;
               DataItemTable=Table18;
               PrintOnlyIfDetail=No;
               ReqFilterFields=No.,Search Name }

    { 3   ;1   ;Column  ;Customer__No__      ;
               SourceExpr="No." }

  }
  REQUESTPAGE
  {
    PROPERTIES
    {
      SaveValues=Yes;
    }
    CONTROLS
    {
      { 1   ;0   ;Container ;
                  ContainerType=ContentArea }

    }
  }
  LABELS
  {
    { 1   ;PageCaption         ;CaptionML=ENU=Page }
  }
  CODE
  {
    VAR
      CustFilter@1000 : Text;

    BEGIN
    END.
  }
  RDLDATA
  {
    <?xml version="1.0" encoding="utf-8"?>
    <Report xmlns="http://schemas.microsoft.com/sqlserver/reporting/2016/01/reportdefinition">
      <Body><Height>2in</Height></Body>
    </Report>
    END_OF_RDLDATA
  }
}
"#;

pub const CODEUNIT: &str = r#"OBJECT Codeunit 80 Sales-Post
{
  OBJECT-PROPERTIES
  {
    Date=26.03.19;
    Time=12:00:00;
    Version List=NAVW111.00;
  }
  PROPERTIES
  {
    TableNo=36;
    Permissions=TableData 37=imd,
                TableData 110=imd;
    OnRun=VAR
            SalesHeader@1000 : Record 36;
          BEGIN
            SalesHeader.COPY(Rec);
            Code(SalesHeader);
            Rec := SalesHeader;
          END;

  }
  CODE
  {
    VAR
      Text001@1001 : TextConst 'ENU=There is nothing to post.';
      GLSetup@1002 : Record 98;
      Window@1003 : Dialog;
      XmlDoc@1004 : DotNet "'System.Xml, Version=4.0.0.0'.System.Xml.XmlDocument" WITHEVENTS RUNONCLIENT;

    LOCAL PROCEDURE Code@2(VAR SalesHeader@1000 : Record 36);
    VAR
      i@1001 : Integer;
      Amounts@1002 : ARRAY [10] OF Decimal;
    BEGIN
      IF NOT SalesHeader.FIND THEN
        ERROR(Text001);
      CASE SalesHeader."Document Type" OF
        SalesHeader."Document Type"::Order:
          Window.OPEN('#1#################################');
        SalesHeader."Document Type"::Invoice,
        SalesHeader."Document Type"::"Credit Memo":
          BEGIN
            Window.UPDATE(1,SalesHeader."No.");
          END;
        ELSE
          EXIT;
      END;
      FOR i := 1 TO ARRAYLEN(Amounts) DO
        Amounts[i] := 0;
      REPEAT
        i -= 1;
      UNTIL (i <= 0) OR (Amounts[1] <> 0);
      WHILE i < 10 DO
        i := i + 1;
    END;

    [EventSubscriber(Table,36,OnAfterValidateEvent,Sell-to Customer No.)]
    LOCAL PROCEDURE OnAfterValidateSellTo@3(VAR Rec@1000 : Record 36;VAR xRec@1001 : Record 36;CurrFieldNo@1002 : Integer);
    BEGIN
    END;

    [Integration(TRUE)]
    PROCEDURE OnBeforePost@4(VAR SalesHeader@1000 : Record 36);
    BEGIN
    END;

    EVENT XmlDoc@1004::NodeInserted@5(sender@1000 : Variant;e@1001 : DotNet "'System.Xml'.System.Xml.XmlNodeChangedEventArgs");
    BEGIN
    END;

    BEGIN
    END.
  }
}
"#;

pub const XMLPORT: &str = r#"OBJECT XMLport 1220 Data Exch. Import - CSV
{
  OBJECT-PROPERTIES
  {
    Date=26.03.19;
    Time=12:00:00;
    Version List=NAVW111.00;
  }
  PROPERTIES
  {
    CaptionML=ENU=Data Exch. Import - CSV;
    Direction=Import;
    Format=Variable Text;
    OnPreXMLport=BEGIN
                   InitializeGlobals;
                 END;

  }
  ELEMENTS
  {
    { [{3B4E4B5A-1B0C-4A4E-8E0B-A1D8B0BDF2C1}];  ;root                ;Element ;Text     }

    { [{C1E6E1D5-4F5B-4D63-9C4A-2B6A0AF0E5B1}];1 ;DataExchDocument    ;Element ;Table   ;
                                                  SourceTable=Table1220;
                                                  AutoSave=No }

  }
  EVENTS
  {
  }
  REQUESTPAGE
  {
    PROPERTIES
    {
    }
    CONTROLS
    {
    }
  }
  CODE
  {
    VAR
      DataExchEntryNo@1000 : Integer;

    LOCAL PROCEDURE InitializeGlobals@1();
    BEGIN
      DataExchEntryNo := 0;
    END;

    BEGIN
    END.
  }
}
"#;

pub const QUERY: &str = r#"OBJECT Query 100 Top Customer Overview
{
  OBJECT-PROPERTIES
  {
    Date=26.03.19;
    Time=12:00:00;
    Version List=NAVW111.00;
  }
  PROPERTIES
  {
    CaptionML=ENU=Top Customer Overview;
    OrderBy=Sales_LCY=Descending;
  }
  ELEMENTS
  {
    { 1   ;    ;DataItem;                    ;
               DataItemTable=Table18 }

    { 2   ;1   ;Column  ;Name                ;
               DataSource=Name }

    { 3   ;1   ;Column  ;Sales_LCY           ;
               DataSource=Sales (LCY) }

  }
  CODE
  {

    BEGIN
    END.
  }
}
"#;

pub const MENUSUITE: &str = r#"OBJECT MenuSuite 1010 Dept - Company
{
  OBJECT-PROPERTIES
  {
    Date=26.03.19;
    Time=12:00:00;
    Version List=NAVW111.00;
  }
  PROPERTIES
  {
  }
  MENUNODES
  {
    {                ;[{4D3A4E8A-B0E5-4A3D-8B1A-0D2C1E4F5A6B}] ;Name=Departments;
                                                Visible=Yes;
                                                NextNodeID=[{00000000-0000-0000-0000-000000000000}] }
  }
}
"#;

/// Every fixture with the section kinds its body is expected to hold
pub const ALL: &[(&str, &str)] = &[
    ("Table", TABLE),
    ("Page", PAGE),
    ("Report", REPORT),
    ("Codeunit", CODEUNIT),
    ("XMLport", XMLPORT),
    ("Query", QUERY),
    ("MenuSuite", MENUSUITE),
];

/// A codeunit carrying a section whose name is not reserved
pub const WITH_UNKNOWN_SECTION: &str = r#"OBJECT Codeunit 50100 Legacy Export
{
  PROPERTIES
  {
  }
  CODE
  {
    BEGIN
    END.
  }
  LEGACY-DATA
  {
    { 1 ; Alpha ; Beta }
    free form text line
    NESTED SECTION
    {
      more text
    }
  }
}
"#;

/// A report whose layout payload has CRLF lines and brace-like content
pub const PAYLOAD_REPORT: &str = "OBJECT Report 50000 Payload\r\n{\r\n  PROPERTIES\r\n  {\r\n  }\r\n  DATASET\r\n  {\r\n  }\r\n  WORDLAYOUT\r\n  {\r\n    UEsDBBQABgAIAAAAIQ{DZ\r\n    BEGIN 'unbalanced\r\n    END_OF_WORDLAYOUT\r\n  }\r\n}\r\n";
