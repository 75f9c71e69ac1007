mod fact_lookup;
